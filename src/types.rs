multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal State: derived, never stored
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalState {
    /// Voting window has not opened yet.
    Pending,
    /// Members may cast votes.
    Active,
    Canceled,
    /// Window closed without a strict majority or without quorum.
    Defeated,
    /// Window closed with majority and quorum; not queued yet.
    Succeeded,
    /// Queued, waiting for its eta.
    Queued,
    /// Eta reached without execution.
    Expired,
    Executed,
}

// ============================================================
// Action: one external call of a proposal batch
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Action<M: ManagedTypeApi> {
    pub target: ManagedAddress<M>,
    /// EGLD sent along with the call.
    pub value: BigUint<M>,
    /// Endpoint to call on `target`. Empty means a plain EGLD transfer,
    /// in which case `calldata` is stored but not sent.
    pub signature: ManagedBuffer<M>,
    /// Opaque payload, passed to the endpoint as its only argument when
    /// non-empty.
    pub calldata: ManagedBuffer<M>,
}

// ============================================================
// Proposal: the governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    /// Timestamp from which the proposal may execute (0 until queued).
    pub eta: u64,
    pub start_block: u64,
    pub end_block: u64,
    pub for_votes: u64,
    pub against_votes: u64,
    /// Reserved: no endpoint records abstentions yet.
    pub abstain_votes: u64,
    pub canceled: bool,
    pub executed: bool,
    pub description: ManagedBuffer<M>,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn total_votes(&self) -> u64 {
        self.for_votes + self.against_votes + self.abstain_votes
    }

    /// Derives the lifecycle state from the stored flags and the clock.
    ///
    /// The checks run in a fixed order and the first match wins: a canceled
    /// or still-open proposal is reported as such whatever its tally, defeat
    /// is decided before success, and a completed execution is never
    /// reported as expired.
    pub fn state_at(&self, current_block: u64, current_timestamp: u64, quorum: u64) -> ProposalState {
        if self.canceled {
            ProposalState::Canceled
        } else if current_block <= self.start_block {
            ProposalState::Pending
        } else if current_block <= self.end_block {
            ProposalState::Active
        } else if self.for_votes <= self.against_votes || self.for_votes < quorum {
            ProposalState::Defeated
        } else if self.eta == 0 {
            ProposalState::Succeeded
        } else if self.executed {
            ProposalState::Executed
        } else if current_timestamp >= self.eta {
            ProposalState::Expired
        } else {
            ProposalState::Queued
        }
    }
}

// ============================================================
// Receipt: one per (proposal, voter)
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

impl From<bool> for VoteSupport {
    fn from(support: bool) -> Self {
        if support {
            VoteSupport::For
        } else {
            VoteSupport::Against
        }
    }
}

/// `support` only carries meaning when `has_voted` is set; an absent receipt
/// reads as `Against`, the zero value of the enum.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Receipt {
    pub has_voted: bool,
    pub support: VoteSupport,
}

impl Default for Receipt {
    fn default() -> Self {
        Receipt {
            has_voted: false,
            support: VoteSupport::Against,
        }
    }
}
