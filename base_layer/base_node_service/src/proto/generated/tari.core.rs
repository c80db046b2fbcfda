/// The BlockHeader contains all the metadata for the block, including proof of work, a link to the previous block
/// and the transaction kernels.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeader {
    /// Version of the block
    #[prost(uint32, tag = "1")]
    pub version: u32,
    /// Height of this block since the genesis block (height 0)
    #[prost(uint64, tag = "2")]
    pub height: u64,
    /// Hash of the block previous to this in the chain.
    #[prost(bytes, tag = "4")]
    pub prev_hash: ::std::vec::Vec<u8>,
    /// Timestamp at which the block was built.
    #[prost(uint64, tag = "5")]
    pub timestamp: u64,
    /// This is the UTXO merkle root of the outputs
    #[prost(bytes, tag = "6")]
    pub output_mr: ::std::vec::Vec<u8>,
    /// This is the MMR root of the kernels
    #[prost(bytes, tag = "8")]
    pub kernel_mr: ::std::vec::Vec<u8>,
    /// Nonce increment used to mine this block.
    #[prost(uint64, tag = "11")]
    pub nonce: u64,
    /// The algorithm used to mine this block
    #[prost(uint64, tag = "12")]
    pub pow_algo: u64,
}
/// The components of the block or transaction. The same struct can be used for either, since in Mimblewimble,
/// cut-through means that blocks and transactions have the same structure.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AggregateBody {
    /// Commitments of the outputs spent by this body
    #[prost(message, repeated, tag = "1")]
    pub inputs: ::std::vec::Vec<super::types::Commitment>,
    /// List of outputs produced by this transaction
    #[prost(message, repeated, tag = "2")]
    pub outputs: ::std::vec::Vec<super::types::TransactionOutput>,
    /// Kernels contain the excesses and their signatures for transaction
    #[prost(message, repeated, tag = "3")]
    pub kernels: ::std::vec::Vec<super::types::TransactionKernel>,
}
/// A Tari block. Blocks are linked together into a blockchain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(message, optional, tag = "1")]
    pub header: ::std::option::Option<BlockHeader>,
    #[prost(message, optional, tag = "2")]
    pub body: ::std::option::Option<AggregateBody>,
}
/// The representation of a historical block in the blockchain. It is essentially identical to a protocol-defined
/// block but contains some extra metadata that clients such as Block Explorers will find interesting.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HistoricalBlock {
    /// The number of blocks that have been mined since this block, including this one. The current tip will have one
    /// confirmation.
    #[prost(uint64, tag = "1")]
    pub confirmations: u64,
    /// The underlying block
    #[prost(message, optional, tag = "3")]
    pub block: ::std::option::Option<Block>,
    /// Accumulated difficulty of the chain up to and including this block, as a 16 byte little endian integer
    #[prost(bytes, tag = "4")]
    pub accumulated_difficulty: ::std::vec::Vec<u8>,
}
/// The new block template is used constructing a new partial block, allowing a miner to added the coinbase utxo and
/// as a final step the Base node to add the MMR roots to the header.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NewBlockTemplate {
    /// The NewBlockHeaderTemplate is used for the construction of a new mineable block. It contains all the metadata
    /// for the block that the Base Node is able to complete on behalf of a Miner.
    #[prost(message, optional, tag = "1")]
    pub header: ::std::option::Option<BlockHeader>,
    /// The transactions selected for the block
    #[prost(message, optional, tag = "2")]
    pub body: ::std::option::Option<AggregateBody>,
    /// The difficulty the miner must reach
    #[prost(uint64, tag = "3")]
    pub target_difficulty: u64,
    /// The value of the emission for the coinbase output for the block, excluding fees
    #[prost(uint64, tag = "4")]
    pub reward: u64,
    /// Sum of all transaction fees in this block
    #[prost(uint64, tag = "5")]
    pub total_fees: u64,
}
