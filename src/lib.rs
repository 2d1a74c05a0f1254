#![no_std]

multiversx_sc::imports!();

pub mod membership;
pub mod types;

use types::{Action, Proposal, ProposalState, Receipt, VoteSupport};

// ============================================================
// Constants
// ============================================================

/// Blocks between proposal creation and the opening of the voting window
pub const VOTING_DELAY: u64 = 1;

/// Length of the voting window in blocks (~9 days at 15s per block)
pub const VOTING_PERIOD: u64 = 51_840;

/// 25% quorum: for votes must reach 25% of current membership
pub const QUORUM_PERCENTAGE: u64 = 25;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait MembershipGovernor: membership::MembershipModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, membership_stake: BigUint, timelock_delay: u64) {
        require!(membership_stake > 0u64, "Membership stake must be positive");
        require!(timelock_delay > 0, "Timelock delay must be positive");

        self.membership_stake().set(&membership_stake);
        self.timelock_delay().set(timelock_delay);
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: propose
    // Open to any caller. One record plus an ordered action list.
    // ========================================================

    #[endpoint(propose)]
    fn propose(
        &self,
        targets: ManagedVec<ManagedAddress>,
        values: ManagedVec<BigUint>,
        signatures: ManagedVec<ManagedBuffer>,
        calldatas: ManagedVec<ManagedBuffer>,
        description: ManagedBuffer,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let action_count = targets.len();

        require!(
            values.len() == action_count
                && signatures.len() == action_count
                && calldatas.len() == action_count,
            "Proposal function information arity mismatch"
        );
        require!(action_count > 0, "Must provide actions");

        let proposal_id = self.proposal_count().get() + 1u64;
        let start_block = self.blockchain().get_block_nonce() + VOTING_DELAY;
        let end_block = start_block + VOTING_PERIOD;

        let mut actions = self.proposal_actions(proposal_id);
        for index in 0..action_count {
            let action = Action {
                target: targets.get(index).clone_value(),
                value: values.get(index).clone_value(),
                signature: signatures.get(index).clone_value(),
                calldata: calldatas.get(index).clone_value(),
            };
            actions.push(&action);
            self.proposal_action_event(proposal_id, index as u32, &action);
        }

        let proposal = Proposal {
            id: proposal_id,
            proposer: caller.clone(),
            eta: 0u64,
            start_block,
            end_block,
            for_votes: 0u64,
            against_votes: 0u64,
            abstain_votes: 0u64,
            canceled: false,
            executed: false,
            description,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(
            proposal_id,
            &caller,
            start_block,
            end_block,
            &proposal.description,
        );

        proposal_id
    }

    // ========================================================
    // ENDPOINT: castVote
    // One vote per member per proposal, only while Active.
    // ========================================================

    #[endpoint(castVote)]
    fn cast_vote(&self, proposal_id: u64, support: bool) {
        let caller = self.blockchain().get_caller();
        require!(self.is_member(&caller), "Only members can vote");
        require!(
            self.state(proposal_id) == ProposalState::Active,
            "Voting is closed"
        );

        let receipt_mapper = self.receipts(proposal_id, &caller);
        require!(receipt_mapper.is_empty(), "Voter already voted");

        let vote_support = VoteSupport::from(support);
        self.proposals(proposal_id)
            .update(|proposal| match vote_support {
                VoteSupport::For => proposal.for_votes += 1,
                VoteSupport::Against => proposal.against_votes += 1,
                VoteSupport::Abstain => proposal.abstain_votes += 1,
            });
        receipt_mapper.set(Receipt {
            has_voted: true,
            support: vote_support,
        });

        self.vote_cast_event(proposal_id, &caller, support);
    }

    // ========================================================
    // ENDPOINT: cancel
    // Proposer or contract owner, any time before execution.
    // ========================================================

    #[endpoint(cancel)]
    fn cancel(&self, proposal_id: u64) {
        let caller = self.blockchain().get_caller();
        self.require_valid_proposal(proposal_id);

        // Flags, not derived state: a live quorum can report an executed
        // proposal as Defeated.
        let proposal = self.proposals(proposal_id).get();
        require!(!proposal.executed, "Cannot cancel executed proposal");
        require!(!proposal.canceled, "Proposal already canceled");
        require!(
            caller == proposal.proposer || caller == self.blockchain().get_owner_address(),
            "Only proposer or owner can cancel"
        );

        self.proposals(proposal_id)
            .update(|proposal| proposal.canceled = true);

        self.proposal_canceled_event(proposal_id);
    }

    // ========================================================
    // ENDPOINT: queue
    // Succeeded → Queued. Sets eta = now + timelock delay.
    // ========================================================

    #[endpoint(queue)]
    fn queue(&self, proposal_id: u64) {
        require!(
            self.state(proposal_id) == ProposalState::Succeeded,
            "Proposal can only be queued if it is succeeded"
        );

        let eta = self.blockchain().get_block_timestamp() + self.timelock_delay().get();
        self.proposals(proposal_id).update(|proposal| proposal.eta = eta);

        self.proposal_queued_event(proposal_id, eta);
    }

    // ========================================================
    // ENDPOINT: execute
    // Runs the action batch once eta has been reached.
    // Reaching eta without execution reads as Expired, so that
    // is the only state from which execution proceeds.
    // ========================================================

    #[endpoint(execute)]
    fn execute(&self, proposal_id: u64) {
        match self.state(proposal_id) {
            ProposalState::Expired => {}
            ProposalState::Queued => sc_panic!("Proposal has not surpassed timelock"),
            _ => sc_panic!("Proposal can only be executed if it is queued"),
        }

        // Flag first: a re-entrant call sees Executed.
        self.proposals(proposal_id)
            .update(|proposal| proposal.executed = true);

        for action in self.proposal_actions(proposal_id).iter() {
            self.dispatch_action(action);
        }

        self.proposal_executed_event(proposal_id);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_valid_proposal(&self, proposal_id: u64) {
        require!(
            proposal_id > 0 && proposal_id <= self.proposal_count().get(),
            "Invalid proposal id"
        );
    }

    fn dispatch_action(&self, action: Action<Self::Api>) {
        if action.signature.is_empty() {
            self.send().direct_egld(&action.target, &action.value);
            return;
        }

        self.tx()
            .to(&action.target)
            .egld(&action.value)
            .raw_call(action.signature)
            .arguments_raw(self.call_arguments(action.calldata))
            .sync_call();
    }

    /// A non-empty payload travels as the single endpoint argument.
    fn call_arguments(&self, calldata: ManagedBuffer) -> ManagedArgBuffer<Self::Api> {
        let mut arguments = ManagedArgBuffer::new();
        if !calldata.is_empty() {
            arguments.push_arg_raw(calldata);
        }
        arguments
    }

    // ========================================================
    // VIEWS: read-only queries
    // ========================================================

    #[view(state)]
    fn state(&self, proposal_id: u64) -> ProposalState {
        self.require_valid_proposal(proposal_id);

        let proposal = self.proposals(proposal_id).get();
        proposal.state_at(
            self.blockchain().get_block_nonce(),
            self.blockchain().get_block_timestamp(),
            self.quorum_votes(),
        )
    }

    /// Recomputed against the membership at the time of the call.
    #[view(quorumVotes)]
    fn quorum_votes(&self) -> u64 {
        QUORUM_PERCENTAGE * self.total_members() / 100
    }

    #[view(votingDelay)]
    fn voting_delay(&self) -> u64 {
        VOTING_DELAY
    }

    #[view(votingPeriod)]
    fn voting_period(&self) -> u64 {
        VOTING_PERIOD
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(getProposal)]
    fn get_proposal(&self, id: u64) -> Proposal<Self::Api> {
        self.require_valid_proposal(id);
        self.proposals(id).get()
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        if count == 0 || total == 0 {
            return result;
        }
        let start = if from == 0 { 1u64 } else { from };
        if start > total {
            return result;
        }
        let end = core::cmp::min(start.saturating_add(count - 1), total);

        for i in start..=end {
            result.push(self.proposals(i).get());
        }
        result
    }

    #[view(getProposalActions)]
    fn get_proposal_actions(&self, id: u64) -> MultiValueEncoded<Action<Self::Api>> {
        self.require_valid_proposal(id);

        let mut result = MultiValueEncoded::new();
        for action in self.proposal_actions(id).iter() {
            result.push(action);
        }
        result
    }

    #[view(getReceipt)]
    fn get_receipt(&self, proposal_id: u64, voter: &ManagedAddress) -> Receipt {
        let receipt_mapper = self.receipts(proposal_id, voter);
        if receipt_mapper.is_empty() {
            return Receipt::default();
        }
        receipt_mapper.get()
    }

    #[view(getContractConfig)]
    fn get_contract_config(&self) -> MultiValue5<BigUint, u64, u64, u64, u64> {
        let stake = self.membership_stake().get();
        let timelock = self.timelock_delay().get();
        (stake, timelock, VOTING_DELAY, VOTING_PERIOD, QUORUM_PERCENTAGE).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] start_block: u64,
        #[indexed] end_block: u64,
        description: &ManagedBuffer,
    );

    #[event("proposalAction")]
    fn proposal_action_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] index: u32,
        action: &Action<Self::Api>,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: bool,
    );

    #[event("proposalCanceled")]
    fn proposal_canceled_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalQueued")]
    fn proposal_queued_event(&self, #[indexed] proposal_id: u64, eta: u64);

    #[event("proposalExecuted")]
    fn proposal_executed_event(&self, #[indexed] proposal_id: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("timelockDelay")]
    fn timelock_delay(&self) -> SingleValueMapper<u64>;

    // ── Proposals ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("proposalActions")]
    fn proposal_actions(&self, id: u64) -> VecMapper<Action<Self::Api>>;

    // ── Receipts ──

    #[storage_mapper("receipts")]
    fn receipts(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<Receipt>;
}
