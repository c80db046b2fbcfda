// Copyright 2024. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! A request/reply channel between the handle held by local services and the task that owns the requests. Every
//! request travels with a oneshot sender, so the caller awaits exactly one reply to exactly one request.

use std::{pin::Pin, task::Poll};

use futures::{
    channel::{
        mpsc::{self, SendError},
        oneshot,
    },
    ready,
    stream::FusedStream,
    task::Context,
    Future,
    FutureExt,
    Stream,
    StreamExt,
};
use thiserror::Error;
use tower_service::Service;

type Envelope<TReq, TRes> = (TReq, oneshot::Sender<TRes>);

/// Create a new Requester/Responder pair that holds at most `buffer` requests (plus one per sender) before
/// `poll_ready` applies backpressure.
pub fn channel<TReq, TRes>(buffer: usize) -> (SenderService<TReq, TRes>, Receiver<TReq, TRes>) {
    let (tx, rx) = mpsc::channel(buffer);
    (SenderService::new(tx), Receiver::new(rx))
}

/// Sends `TReq` requests to the [Receiver] and returns a [TransportResponseFuture] that resolves to the `TRes` reply.
///
/// This implements `tower_service::Service`, therefore `poll_ready` must resolve before `call` is used to make a
/// request.
pub struct SenderService<TReq, TRes> {
    tx: mpsc::Sender<Envelope<TReq, TRes>>,
}

impl<TReq, TRes> SenderService<TReq, TRes> {
    fn new(tx: mpsc::Sender<Envelope<TReq, TRes>>) -> Self {
        Self { tx }
    }

    /// Returns true if the receiving side has been dropped or closed
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<TReq, TRes> Clone for SenderService<TReq, TRes> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<TReq, TRes> Service<TReq> for SenderService<TReq, TRes> {
    type Error = TransportChannelError;
    type Future = TransportResponseFuture<TRes>;
    type Response = TRes;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.tx.poll_ready(cx).map_err(|err| {
            if err.is_disconnected() {
                TransportChannelError::ChannelClosed
            } else {
                TransportChannelError::SendError(err)
            }
        })
    }

    fn call(&mut self, request: TReq) -> Self::Future {
        let (reply_tx, reply_rx) = oneshot::channel();
        match self.tx.try_send((request, reply_tx)) {
            Ok(_) => TransportResponseFuture::new(reply_rx),
            Err(err) if err.is_disconnected() => TransportResponseFuture::closed(),
            // The channel is full because `call` was used without waiting for `poll_ready`
            Err(err) => TransportResponseFuture::failed(TransportChannelError::SendError(err.into_send_error())),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum TransportChannelError {
    #[error("Error occurred when sending: `{0}`")]
    SendError(#[from] SendError),
    #[error("Request was canceled")]
    Canceled,
    #[error("The response channel has closed")]
    ChannelClosed,
}

enum ResponseState<T> {
    Waiting(oneshot::Receiver<T>),
    Failed(Option<TransportChannelError>),
}

/// Response future for replies received over a oneshot channel.
pub struct TransportResponseFuture<T> {
    state: ResponseState<T>,
}

impl<T> TransportResponseFuture<T> {
    pub fn new(rx: oneshot::Receiver<T>) -> Self {
        Self {
            state: ResponseState::Waiting(rx),
        }
    }

    /// A future that resolves to `TransportChannelError::ChannelClosed` when polled
    pub fn closed() -> Self {
        Self::failed(TransportChannelError::ChannelClosed)
    }

    fn failed(err: TransportChannelError) -> Self {
        Self {
            state: ResponseState::Failed(Some(err)),
        }
    }
}

impl<T> Future for TransportResponseFuture<T> {
    type Output = Result<T, TransportChannelError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            ResponseState::Waiting(rx) => rx.poll_unpin(cx).map_err(|_| TransportChannelError::Canceled),
            ResponseState::Failed(err) => {
                Poll::Ready(Err(err.take().unwrap_or(TransportChannelError::ChannelClosed)))
            },
        }
    }
}

/// The request as received by the owning task, together with the channel used to reply to it.
pub struct RequestContext<TReq, TRes> {
    reply_tx: oneshot::Sender<TRes>,
    request: TReq,
}

impl<TReq, TRes> RequestContext<TReq, TRes> {
    pub fn new(request: TReq, reply_tx: oneshot::Sender<TRes>) -> Self {
        Self { request, reply_tx }
    }

    pub fn request(&self) -> &TReq {
        &self.request
    }

    /// Returns true if the caller stopped waiting for the reply
    pub fn is_canceled(&self) -> bool {
        self.reply_tx.is_canceled()
    }

    /// Consume this object and return it's parts. Namely, the request object and
    /// the reply oneshot channel.
    pub fn split(self) -> (TReq, oneshot::Sender<TRes>) {
        (self.request, self.reply_tx)
    }

    /// Sends a reply to the caller. The reply is handed back if the caller is no longer waiting.
    pub fn reply(self, resp: TRes) -> Result<(), TRes> {
        self.reply_tx.send(resp)
    }
}

/// Receiver side of the reply channel.
/// This is functionally equivalent to `rx.map(|(req, reply_tx)| RequestContext::new(req, reply_tx))`
/// but implements FusedStream, so it can be used directly in a `select!` loop.
pub struct Receiver<TReq, TRes> {
    rx: mpsc::Receiver<Envelope<TReq, TRes>>,
}

impl<TReq, TRes> Receiver<TReq, TRes> {
    fn new(rx: mpsc::Receiver<Envelope<TReq, TRes>>) -> Self {
        Self { rx }
    }

    /// Stop accepting requests. Requests that were already sent can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

impl<TReq, TRes> FusedStream for Receiver<TReq, TRes> {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}

impl<TReq, TRes> Stream for Receiver<TReq, TRes> {
    type Item = RequestContext<TReq, TRes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match ready!(self.rx.poll_next_unpin(cx)) {
            Some((req, reply_tx)) => Poll::Ready(Some(RequestContext::new(req, reply_tx))),
            // Stream has closed, so we're done
            None => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
mod test {
    use futures::future;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn response_future_resolves_to_reply() {
        let (tx, rx) = oneshot::channel::<u64>();
        tx.send(42).unwrap();
        assert_eq!(TransportResponseFuture::new(rx).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn response_future_closed() {
        let err = TransportResponseFuture::<()>::closed().await.unwrap_err();
        unpack_enum!(TransportChannelError::ChannelClosed = err);
    }

    #[tokio::test]
    async fn request_response_success() {
        let (requester, mut request_stream) = channel::<_, &str>(1);

        let (result, _) = future::join(requester.oneshot("GetChainMetadata"), async move {
            let req = request_stream.next().await.unwrap();
            assert_eq!(*req.request(), "GetChainMetadata");
            req.reply("ChainMetadata").unwrap();
        })
        .await;

        assert_eq!(result.unwrap(), "ChainMetadata");
    }

    #[tokio::test]
    async fn request_split_reply() {
        let (requester, mut request_stream) = channel::<_, u64>(1);

        let (result, _) = future::join(requester.oneshot(20u64), async move {
            let (height, reply_tx) = request_stream.next().await.unwrap().split();
            reply_tx.send(height + 1).unwrap();
        })
        .await;

        assert_eq!(result.unwrap(), 21);
    }

    #[tokio::test]
    async fn requester_channel_closed() {
        let (requester, mut request_stream) = channel::<_, ()>(1);
        request_stream.close();
        assert!(requester.is_closed());

        let err = requester.oneshot(()).await.unwrap_err();
        unpack_enum!(TransportChannelError::ChannelClosed = err);
    }

    #[tokio::test]
    async fn request_abandoned_by_caller() {
        let (requester, mut request_stream) = channel::<_, &str>(1);

        // Dropping the response future drops the reply receiver
        drop(requester.ready_oneshot().await.unwrap().call("GetChainMetadata"));
        let req = request_stream.next().await.unwrap();
        assert!(req.is_canceled());
        assert_eq!(req.reply("ChainMetadata").unwrap_err(), "ChainMetadata");
    }

    #[tokio::test]
    async fn call_without_capacity_fails() {
        let (requester, _request_stream) = channel::<_, ()>(0);
        let mut requester = requester.ready_oneshot().await.unwrap();
        let _pending = requester.call(());
        // The buffer holds the single slot of this sender, so the next call finds the channel full
        let err = requester.call(()).await.unwrap_err();
        unpack_enum!(TransportChannelError::SendError(_e) = err);
    }

    #[tokio::test]
    async fn request_dropped_by_receiver() {
        let (requester, mut request_stream) = channel::<_, &str>(1);

        let (result, _) = future::join(requester.oneshot("GetChainMetadata"), async move {
            let req = request_stream.next().await.unwrap();
            drop(req);
        })
        .await;

        assert_eq!(result.unwrap_err(), TransportChannelError::Canceled);
    }
}
