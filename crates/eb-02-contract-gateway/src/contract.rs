//! Board contract bindings
//!
//! Function signatures per request kind and the call data built from them.

use primitive_types::U256;
use shared_types::{RequestKind, RequestStatus};

use crate::abi::{encode_call, Token};

/// Shared by both kinds.
pub const OWNER: &str = "owner()";

/// Contract functions serving one request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindBinding {
    pub list: &'static str,
    pub add: &'static str,
    pub upvote: &'static str,
    pub set_status: &'static str,
}

const INTEGRATIONS: KindBinding = KindBinding {
    list: "getIntegrationsList()",
    add: "addNewIntegration(string,string)",
    upvote: "upVoteIR(uint256)",
    set_status: "updateIRStatus(uint256,uint8)",
};

const PROBLEM_REPORTS: KindBinding = KindBinding {
    list: "getPRList()",
    add: "addNewIssue(string,string)",
    upvote: "upVotePR(uint256)",
    set_status: "updatePRStatus(uint256,uint8)",
};

pub fn binding(kind: RequestKind) -> KindBinding {
    match kind {
        RequestKind::Integration => INTEGRATIONS,
        RequestKind::ProblemReport => PROBLEM_REPORTS,
    }
}

/// Encoded call plus the signature it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub signature: &'static str,
    pub data: Vec<u8>,
}

impl ContractCall {
    fn new(signature: &'static str, args: &[Token]) -> Self {
        Self {
            signature,
            data: encode_call(signature, args),
        }
    }
}

pub fn owner_call() -> ContractCall {
    ContractCall::new(OWNER, &[])
}

pub fn list_call(kind: RequestKind) -> ContractCall {
    ContractCall::new(binding(kind).list, &[])
}

pub fn add_call(kind: RequestKind, title: &str, description: &str) -> ContractCall {
    ContractCall::new(
        binding(kind).add,
        &[
            Token::String(title.to_string()),
            Token::String(description.to_string()),
        ],
    )
}

pub fn upvote_call(kind: RequestKind, index: u64) -> ContractCall {
    ContractCall::new(binding(kind).upvote, &[Token::Uint(U256::from(index))])
}

pub fn set_status_call(kind: RequestKind, index: u64, status: RequestStatus) -> ContractCall {
    ContractCall::new(
        binding(kind).set_status,
        &[
            Token::Uint(U256::from(index)),
            Token::Uint(U256::from(status.code())),
        ],
    )
}
