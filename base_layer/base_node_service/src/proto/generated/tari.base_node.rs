/// Request type for a received BaseNodeService request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BaseNodeServiceRequest {
    #[prost(uint64, tag = "1")]
    pub request_key: u64,
    #[prost(
        oneof = "base_node_service_request::Request",
        tags = "2, 3, 4, 5, 6, 7, 8, 9, 12, 15, 16, 17, 18, 19, 20"
    )]
    pub request: ::std::option::Option<base_node_service_request::Request>,
}
/// Nested message and enum types in `BaseNodeServiceRequest`.
pub mod base_node_service_request {
    /// Tags 10, 11, 13 and 14 are reserved.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        /// Indicates a GetChainMetadata request. The value of the bool should be ignored.
        #[prost(bool, tag = "2")]
        GetChainMetadata(bool),
        /// Indicates a FetchKernels request.
        #[prost(message, tag = "3")]
        FetchKernels(super::HashOutputs),
        /// Indicates a FetchHeaders request.
        #[prost(message, tag = "4")]
        FetchHeaders(super::BlockHeights),
        /// Indicates a FetchHeadersWithHashes request.
        #[prost(message, tag = "5")]
        FetchHeadersWithHashes(super::HashOutputs),
        /// Indicates a FetchMatchingUtxos request.
        #[prost(message, tag = "6")]
        FetchMatchingUtxos(super::HashOutputs),
        /// Indicates a FetchMatchingBlocks request.
        #[prost(message, tag = "7")]
        FetchMatchingBlocks(super::BlockHeights),
        /// Indicates a FetchBlocksWithHashes request.
        #[prost(message, tag = "8")]
        FetchBlocksWithHashes(super::HashOutputs),
        /// Indicates a GetNewBlockTemplate request.
        #[prost(message, tag = "9")]
        GetNewBlockTemplate(super::NewBlockTemplateRequest),
        /// Get headers in best chain following any headers in this list
        #[prost(message, tag = "12")]
        FetchHeadersAfter(super::FetchHeadersAfter),
        /// Indicates a FetchMatchingTxos request.
        #[prost(message, tag = "15")]
        FetchMatchingTxos(super::HashOutputs),
        /// Indicates a Fetch block with kernels request
        #[prost(message, tag = "16")]
        FetchBlocksWithKernels(super::Signatures),
        /// Indicates a Fetch block with spent outputs request
        #[prost(message, tag = "17")]
        FetchBlocksWithStxos(super::Commitments),
        /// Indicates a Fetch block with unspent outputs request
        #[prost(message, tag = "18")]
        FetchBlocksWithUtxos(super::Commitments),
        /// Indicates a GetHeaderByHash request.
        #[prost(bytes, tag = "19")]
        GetHeaderByHash(::std::vec::Vec<u8>),
        /// Indicates a GetBlockByHash request.
        #[prost(bytes, tag = "20")]
        GetBlockByHash(::std::vec::Vec<u8>),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeights {
    #[prost(uint64, repeated, tag = "1")]
    pub heights: ::std::vec::Vec<u64>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HashOutputs {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub outputs: ::std::vec::Vec<::std::vec::Vec<u8>>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signatures {
    #[prost(message, repeated, tag = "1")]
    pub sigs: ::std::vec::Vec<super::types::Signature>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Commitments {
    #[prost(message, repeated, tag = "1")]
    pub commitments: ::std::vec::Vec<super::types::Commitment>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchHeadersAfter {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub hashes: ::std::vec::Vec<::std::vec::Vec<u8>>,
    #[prost(bytes, tag = "2")]
    pub stopping_hash: ::std::vec::Vec<u8>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NewBlockTemplateRequest {
    /// The proof of work algorithm the template is mined with
    #[prost(uint64, tag = "1")]
    pub algo: u64,
    /// The maximum weight of the block body. Zero selects the node's maximum block weight.
    #[prost(uint64, tag = "2")]
    pub max_weight: u64,
}
/// Response type for a received BaseNodeService requests
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BaseNodeServiceResponse {
    #[prost(uint64, tag = "1")]
    pub request_key: u64,
    #[prost(
        oneof = "base_node_service_response::Response",
        tags = "2, 3, 4, 5, 6, 7, 10, 14, 15, 16"
    )]
    pub response: ::std::option::Option<base_node_service_response::Response>,
}
/// Nested message and enum types in `BaseNodeServiceResponse`.
pub mod base_node_service_response {
    /// Tags 8, 9, 11, 12 and 13 are reserved.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        /// Indicates a ChainMetadata response.
        #[prost(message, tag = "2")]
        ChainMetadata(super::ChainMetadata),
        /// Indicates a TransactionKernels response.
        #[prost(message, tag = "3")]
        TransactionKernels(super::TransactionKernels),
        /// Indicates a BlockHeaders response.
        #[prost(message, tag = "4")]
        BlockHeaders(super::BlockHeaders),
        /// Indicates a TransactionOutputs response.
        #[prost(message, tag = "5")]
        TransactionOutputs(super::TransactionOutputs),
        /// Indicates a HistoricalBlocks response.
        #[prost(message, tag = "6")]
        HistoricalBlocks(super::HistoricalBlocks),
        /// Indicates a NewBlockTemplate response.
        #[prost(message, tag = "7")]
        NewBlockTemplate(super::super::core::NewBlockTemplate),
        /// Block headers in range response
        #[prost(message, tag = "10")]
        FetchHeadersAfterResponse(super::BlockHeaders),
        /// Indicates a BlockHeader response.
        #[prost(message, tag = "14")]
        BlockHeader(super::super::core::BlockHeader),
        /// Indicates a HistoricalBlock response.
        #[prost(message, tag = "15")]
        HistoricalBlock(super::super::core::HistoricalBlock),
        /// The request could not be answered
        #[prost(message, tag = "16")]
        Error(super::ServiceError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainMetadata {
    /// The current chain height, or the block number of the longest valid chain
    #[prost(uint64, tag = "1")]
    pub best_block_height: u64,
    /// The block hash of the current tip of the longest valid chain
    #[prost(bytes, tag = "2")]
    pub best_block_hash: ::std::vec::Vec<u8>,
    /// The number of blocks back from the tip that this database tracks. A value of 0 indicates that all blocks are
    /// tracked (i.e. the database is in full archival mode).
    #[prost(uint64, tag = "4")]
    pub pruning_horizon: u64,
    /// The total accumulated proof of work of the longest chain, as a 16 byte little endian integer
    #[prost(bytes, tag = "5")]
    pub accumulated_difficulty: ::std::vec::Vec<u8>,
    /// The height of the pruning horizon. This indicates from what height
    /// a full block can be provided (exclusive).
    /// If `pruned_height` is equal to the `best_block_height` no blocks can be provided.
    /// Archival nodes wil always have an `pruned_height` of zero.
    #[prost(uint64, tag = "6")]
    pub pruned_height: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeaders {
    #[prost(message, repeated, tag = "1")]
    pub headers: ::std::vec::Vec<super::core::BlockHeader>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionKernels {
    #[prost(message, repeated, tag = "1")]
    pub kernels: ::std::vec::Vec<super::types::TransactionKernel>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionOutputs {
    #[prost(message, repeated, tag = "1")]
    pub outputs: ::std::vec::Vec<super::types::TransactionOutput>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HistoricalBlocks {
    #[prost(message, repeated, tag = "1")]
    pub blocks: ::std::vec::Vec<super::core::HistoricalBlock>,
}
/// The reason a request could not be answered
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceError {
    #[prost(enumeration = "ErrorKind", tag = "1")]
    pub kind: i32,
    #[prost(string, tag = "2")]
    pub details: ::std::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ErrorKind {
    Unspecified = 0,
    /// The request bytes could not be decoded
    DecodeError = 1,
    /// The request decoded but its payload is invalid
    MalformedPayload = 2,
    /// A request with the same key is already in flight
    DuplicateKey = 3,
    /// No request with the key is in flight
    UnknownKey = 4,
    /// No response arrived before the request expired
    Timeout = 5,
    /// The chain does not contain the requested data
    NotFound = 6,
    /// The chain store could not be reached. The request may be retried.
    StorageUnavailable = 7,
    /// Too many requests are in flight. The request may be retried.
    Busy = 8,
    /// The node failed to answer for an internal reason
    InternalError = 9,
}
