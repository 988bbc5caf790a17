//! Protobuf messages of the `ibc.lightclients.ostracon.v1` package.
//!
//! The Ostracon client shares Tendermint's block, commit and validator set
//! messages and adds a voter set next to each validator set.

/// Type URLs under which the client's values travel inside `Any` envelopes.
pub const OSTRACON_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.ostracon.v1.ClientState";
pub const OSTRACON_CONSENSUS_STATE_TYPE_URL: &str = "/ibc.lightclients.ostracon.v1.ConsensusState";
pub const OSTRACON_HEADER_TYPE_URL: &str = "/ibc.lightclients.ostracon.v1.Header";
pub const OSTRACON_MISBEHAVIOUR_TYPE_URL: &str = "/ibc.lightclients.ostracon.v1.Misbehaviour";

pub mod v1 {
    use ibc_proto::google::protobuf::{Duration, Timestamp};
    use ibc_proto::ibc::core::client::v1::Height;
    use ibc_proto::ibc::core::commitment::v1::MerkleRoot;
    use ibc_proto::ics23::ProofSpec;
    use tendermint_proto::types::{SignedHeader, ValidatorSet};

    /// ClientState of an Ostracon client. A `frozen_height` of zero means
    /// the client is not frozen.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClientState {
        #[prost(string, tag = "1")]
        pub chain_id: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "2")]
        pub trust_level: ::core::option::Option<Fraction>,
        #[prost(message, optional, tag = "3")]
        pub trusting_period: ::core::option::Option<Duration>,
        #[prost(message, optional, tag = "4")]
        pub unbonding_period: ::core::option::Option<Duration>,
        #[prost(message, optional, tag = "5")]
        pub max_clock_drift: ::core::option::Option<Duration>,
        #[prost(message, optional, tag = "6")]
        pub frozen_height: ::core::option::Option<Height>,
        #[prost(message, optional, tag = "7")]
        pub latest_height: ::core::option::Option<Height>,
        #[prost(message, repeated, tag = "8")]
        pub proof_specs: ::prost::alloc::vec::Vec<ProofSpec>,
        #[prost(string, repeated, tag = "9")]
        pub upgrade_path: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
        #[prost(bool, tag = "10")]
        pub allow_update_after_expiry: bool,
        #[prost(bool, tag = "11")]
        pub allow_update_after_misbehaviour: bool,
    }

    /// ConsensusState records what the client trusts at one height.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ConsensusState {
        #[prost(message, optional, tag = "1")]
        pub timestamp: ::core::option::Option<Timestamp>,
        #[prost(message, optional, tag = "2")]
        pub root: ::core::option::Option<MerkleRoot>,
        #[prost(bytes = "vec", tag = "3")]
        pub next_validators_hash: ::prost::alloc::vec::Vec<u8>,
    }

    /// Header carries a signed header together with the validator and voter
    /// sets that produced it, and the sets trusted at `trusted_height`.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Header {
        #[prost(message, optional, tag = "1")]
        pub signed_header: ::core::option::Option<SignedHeader>,
        #[prost(message, optional, tag = "2")]
        pub validator_set: ::core::option::Option<ValidatorSet>,
        #[prost(message, optional, tag = "3")]
        pub trusted_height: ::core::option::Option<Height>,
        #[prost(message, optional, tag = "4")]
        pub trusted_validators: ::core::option::Option<ValidatorSet>,
        #[prost(message, optional, tag = "5")]
        pub voter_set: ::core::option::Option<ValidatorSet>,
        #[prost(message, optional, tag = "6")]
        pub trusted_voters: ::core::option::Option<ValidatorSet>,
    }

    /// Misbehaviour is two conflicting headers for the same chain.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Misbehaviour {
        #[prost(string, tag = "1")]
        pub client_id: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "2")]
        pub header_1: ::core::option::Option<Header>,
        #[prost(message, optional, tag = "3")]
        pub header_2: ::core::option::Option<Header>,
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct Fraction {
        #[prost(uint64, tag = "1")]
        pub numerator: u64,
        #[prost(uint64, tag = "2")]
        pub denominator: u64,
    }
}
