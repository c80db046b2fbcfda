/// Commitment wrapper
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Commitment {
    #[prost(bytes, tag = "1")]
    pub data: ::std::vec::Vec<u8>,
}
/// Define the explicit Signature implementation for the Tari base layer. A different signature scheme can be
/// employed by redefining this type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    #[prost(bytes, tag = "1")]
    pub public_nonce: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}
/// The transaction kernel tracks the excess for a given transaction. For an explanation of what the excess is, and
/// why it is necessary, refer to the
/// [Mimblewimble TLU post](https://tlu.tarilabs.com/protocols/mimblewimble-1/sources/PITCHME.link.html?highlight=mimblewimble#mimblewimble).
/// The kernel also tracks other transaction metadata, such as the lock height for the transaction (i.e. the earliest
/// this transaction can be mined) and the transaction fee, in cleartext.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionKernel {
    /// Options for a kernel's structure or use
    #[prost(uint32, tag = "1")]
    pub features: u32,
    //// Fee originally included in the transaction this proof is for (in MicroTari)
    #[prost(uint64, tag = "2")]
    pub fee: u64,
    /// This kernel is not valid earlier than lock_height blocks
    #[prost(uint64, tag = "3")]
    pub lock_height: u64,
    /// Remainder of the sum of all transaction commitments. If the transaction
    /// is well formed, amounts components should sum to zero and the excess
    /// is hence a valid public key.
    #[prost(message, optional, tag = "6")]
    pub excess: ::std::option::Option<Commitment>,
    /// The signature proving the excess is a valid public key, which signs
    /// the transaction fee.
    #[prost(message, optional, tag = "7")]
    pub excess_sig: ::std::option::Option<Signature>,
}
/// Options for an output's structure or use
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutputFeatures {
    #[prost(uint32, tag = "1")]
    pub output_type: u32,
    /// The maturity of the specific UTXO. This is the min lock height at which an UTXO can be spend. Coinbase UTXO
    /// require a min maturity of the Coinbase_lock_height, this should be checked on receiving new blocks.
    #[prost(uint64, tag = "2")]
    pub maturity: u64,
}
/// Output for a transaction, defining the new ownership of coins that are being transferred. The commitment is a
/// blinded value for the output while the script is the condition that must be met to spend it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionOutput {
    /// Options for an output's structure or use
    #[prost(message, optional, tag = "1")]
    pub features: ::std::option::Option<OutputFeatures>,
    /// The homomorphic commitment representing the output amount
    #[prost(message, optional, tag = "2")]
    pub commitment: ::std::option::Option<Commitment>,
    /// The serialised script
    #[prost(bytes, tag = "3")]
    pub script: ::std::vec::Vec<u8>,
}
