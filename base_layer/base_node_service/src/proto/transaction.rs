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

use std::convert::TryFrom;

use super::types as proto;
use crate::{
    transactions::{OutputFeatures, TransactionKernel, TransactionOutput},
    types::{Commitment, Signature},
};

//---------------------------------- TransactionKernel --------------------------------------------//

impl TryFrom<proto::TransactionKernel> for TransactionKernel {
    type Error = String;

    fn try_from(kernel: proto::TransactionKernel) -> Result<Self, Self::Error> {
        let excess = kernel
            .excess
            .map(Commitment::try_from)
            .ok_or_else(|| "Excess not provided in kernel".to_string())?
            .map_err(|err| err.to_string())?;

        let excess_sig = Signature::try_from(
            kernel
                .excess_sig
                .ok_or_else(|| "excess_sig not provided".to_string())?,
        )?;

        Ok(Self {
            features: u8::try_from(kernel.features).map_err(|_| "Invalid kernel features".to_string())?,
            fee: kernel.fee,
            lock_height: kernel.lock_height,
            excess,
            excess_sig,
        })
    }
}

impl From<TransactionKernel> for proto::TransactionKernel {
    fn from(kernel: TransactionKernel) -> Self {
        Self {
            features: u32::from(kernel.features),
            fee: kernel.fee,
            lock_height: kernel.lock_height,
            excess: Some(kernel.excess.into()),
            excess_sig: Some(kernel.excess_sig.into()),
        }
    }
}

//---------------------------------- TransactionOutput --------------------------------------------//

impl TryFrom<proto::TransactionOutput> for TransactionOutput {
    type Error = String;

    fn try_from(output: proto::TransactionOutput) -> Result<Self, Self::Error> {
        let features = output
            .features
            .map(OutputFeatures::try_from)
            .ok_or_else(|| "Transaction output features not provided".to_string())??;

        let commitment = output
            .commitment
            .map(Commitment::try_from)
            .ok_or_else(|| "Transaction output commitment not provided".to_string())?
            .map_err(|err| err.to_string())?;

        Ok(Self {
            features,
            commitment,
            script: output.script,
        })
    }
}

impl From<TransactionOutput> for proto::TransactionOutput {
    fn from(output: TransactionOutput) -> Self {
        Self {
            features: Some(output.features.into()),
            commitment: Some(output.commitment.into()),
            script: output.script,
        }
    }
}

//---------------------------------- OutputFeatures --------------------------------------------//

impl TryFrom<proto::OutputFeatures> for OutputFeatures {
    type Error = String;

    fn try_from(features: proto::OutputFeatures) -> Result<Self, Self::Error> {
        Ok(Self {
            output_type: u8::try_from(features.output_type)
                .map_err(|_| format!("Invalid output type {}", features.output_type))?,
            maturity: features.maturity,
        })
    }
}

impl From<OutputFeatures> for proto::OutputFeatures {
    fn from(features: OutputFeatures) -> Self {
        Self {
            output_type: u32::from(features.output_type),
            maturity: features.maturity,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::{create_kernel, create_output};

    #[test]
    fn kernel_requires_an_excess() {
        let mut kernel = proto::TransactionKernel::from(create_kernel(3));
        kernel.excess = None;
        let err = TransactionKernel::try_from(kernel).unwrap_err();
        assert!(err.contains("Excess"));
    }

    #[test]
    fn output_commitment_is_validated() {
        let mut output = proto::TransactionOutput::from(create_output(4));
        output.commitment = Some(proto::Commitment { data: vec![1u8; 12] });
        let err = TransactionOutput::try_from(output).unwrap_err();
        assert!(err.contains("commitment"));
    }
}
