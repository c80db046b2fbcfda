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

use std::convert::{TryFrom, TryInto};

use super::{core as proto, u128_from_le_bytes, u128_to_le_bytes};
use crate::{
    blocks::{AggregateBody, Block, BlockHeader, HistoricalBlock, NewBlockTemplate},
    proof_of_work::PowAlgorithm,
    transactions::{TransactionKernel, TransactionOutput},
    types::{Commitment, FixedHash},
};

//---------------------------------- BlockHeader --------------------------------------------//

impl TryFrom<proto::BlockHeader> for BlockHeader {
    type Error = String;

    fn try_from(header: proto::BlockHeader) -> Result<Self, Self::Error> {
        Ok(Self {
            version: u16::try_from(header.version).map_err(|_| "Invalid header version".to_string())?,
            height: header.height,
            prev_hash: FixedHash::try_from(header.prev_hash).map_err(|err| err.to_string())?,
            timestamp: header.timestamp,
            output_mr: FixedHash::try_from(header.output_mr).map_err(|err| err.to_string())?,
            kernel_mr: FixedHash::try_from(header.kernel_mr).map_err(|err| err.to_string())?,
            nonce: header.nonce,
            pow_algo: PowAlgorithm::try_from(header.pow_algo)?,
        })
    }
}

impl From<BlockHeader> for proto::BlockHeader {
    fn from(header: BlockHeader) -> Self {
        Self {
            version: u32::from(header.version),
            height: header.height,
            prev_hash: header.prev_hash.to_vec(),
            timestamp: header.timestamp,
            output_mr: header.output_mr.to_vec(),
            kernel_mr: header.kernel_mr.to_vec(),
            nonce: header.nonce,
            pow_algo: header.pow_algo.as_u64(),
        }
    }
}

//---------------------------------- AggregateBody --------------------------------------------//

impl TryFrom<proto::AggregateBody> for AggregateBody {
    type Error = String;

    fn try_from(body: proto::AggregateBody) -> Result<Self, Self::Error> {
        let inputs = body
            .inputs
            .into_iter()
            .map(|input| Commitment::try_from(input).map_err(|err| err.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = body
            .outputs
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<TransactionOutput>, _>>()?;
        let kernels = body
            .kernels
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<TransactionKernel>, _>>()?;
        Ok(Self {
            inputs,
            outputs,
            kernels,
        })
    }
}

impl From<AggregateBody> for proto::AggregateBody {
    fn from(body: AggregateBody) -> Self {
        Self {
            inputs: body.inputs.into_iter().map(Into::into).collect(),
            outputs: body.outputs.into_iter().map(Into::into).collect(),
            kernels: body.kernels.into_iter().map(Into::into).collect(),
        }
    }
}

//---------------------------------- Block --------------------------------------------//

impl TryFrom<proto::Block> for Block {
    type Error = String;

    fn try_from(block: proto::Block) -> Result<Self, Self::Error> {
        let header = block
            .header
            .map(TryInto::try_into)
            .ok_or_else(|| "Block header not provided".to_string())??;

        let body = block
            .body
            .map(TryInto::try_into)
            .ok_or_else(|| "Block body not provided".to_string())??;

        Ok(Self { header, body })
    }
}

impl From<Block> for proto::Block {
    fn from(block: Block) -> Self {
        Self {
            header: Some(block.header.into()),
            body: Some(block.body.into()),
        }
    }
}

//---------------------------------- HistoricalBlock --------------------------------------------//

impl TryFrom<proto::HistoricalBlock> for HistoricalBlock {
    type Error = String;

    fn try_from(historical_block: proto::HistoricalBlock) -> Result<Self, Self::Error> {
        let block = historical_block
            .block
            .map(TryInto::try_into)
            .ok_or_else(|| "block in historical block not provided".to_string())??;

        Ok(Self::new(
            block,
            historical_block.confirmations,
            u128_from_le_bytes(&historical_block.accumulated_difficulty)?,
        ))
    }
}

impl From<HistoricalBlock> for proto::HistoricalBlock {
    fn from(block: HistoricalBlock) -> Self {
        Self {
            confirmations: block.confirmations,
            accumulated_difficulty: u128_to_le_bytes(block.accumulated_difficulty),
            block: Some(block.block.into()),
        }
    }
}

//--------------------------------- NewBlockTemplate -------------------------------------------//

impl TryFrom<proto::NewBlockTemplate> for NewBlockTemplate {
    type Error = String;

    fn try_from(template: proto::NewBlockTemplate) -> Result<Self, Self::Error> {
        let header = template
            .header
            .map(TryInto::try_into)
            .ok_or_else(|| "Block header template not provided".to_string())??;

        let body = template
            .body
            .map(TryInto::try_into)
            .ok_or_else(|| "Block body not provided".to_string())??;

        Ok(Self {
            header,
            body,
            target_difficulty: template.target_difficulty,
            reward: template.reward,
            total_fees: template.total_fees,
        })
    }
}

impl From<NewBlockTemplate> for proto::NewBlockTemplate {
    fn from(template: NewBlockTemplate) -> Self {
        Self {
            header: Some(template.header.into()),
            body: Some(template.body.into()),
            target_difficulty: template.target_difficulty,
            reward: template.reward,
            total_fees: template.total_fees,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::create_genesis_block;

    #[test]
    fn header_with_short_hash_is_rejected() {
        let mut header = proto::BlockHeader::from(create_genesis_block().header);
        header.prev_hash = vec![0u8; 20];
        let err = BlockHeader::try_from(header).unwrap_err();
        assert!(err.contains("expected 32 bytes"));
    }

    #[test]
    fn header_with_unknown_pow_algo_is_rejected() {
        let mut header = proto::BlockHeader::from(create_genesis_block().header);
        header.pow_algo = 7;
        assert!(BlockHeader::try_from(header).is_err());
    }

    #[test]
    fn historical_block_keeps_its_chain_context() {
        let block = HistoricalBlock::new(create_genesis_block(), 12, u128::from(u64::MAX) * 3);
        let converted = HistoricalBlock::try_from(proto::HistoricalBlock::from(block.clone())).unwrap();
        assert_eq!(converted, block);
    }
}
