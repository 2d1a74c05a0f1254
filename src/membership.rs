multiversx_sc::imports!();

/// Stake-gated membership registry.
///
/// The member set doubles as the member counter: `members().len()` is the
/// total membership, so the count can never drift from the flags.
#[multiversx_sc::module]
pub trait MembershipModule {
    // ========================================================
    // ENDPOINT: join
    // Exact stake, once per address. No leaving.
    // ========================================================

    #[endpoint(join)]
    #[payable("EGLD")]
    fn join(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(!self.members().contains(&caller), "Already a member");
        require!(
            payment_amount == self.membership_stake().get(),
            "Invalid stake amount"
        );

        self.members().insert(caller.clone());

        self.membership_added_event(&caller, &payment_amount);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isMember)]
    fn is_member(&self, address: &ManagedAddress) -> bool {
        self.members().contains(address)
    }

    #[view(totalMembers)]
    fn total_members(&self) -> u64 {
        self.members().len() as u64
    }

    #[view(getMembershipStake)]
    fn get_membership_stake(&self) -> BigUint {
        self.membership_stake().get()
    }

    #[view(getMembers)]
    fn get_members(&self, from: u64, count: u64) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        let start = from as usize;
        let end = core::cmp::min(start.saturating_add(count as usize), self.members().len());

        for (idx, member) in self.members().iter().enumerate() {
            if idx >= end {
                break;
            }
            if idx >= start {
                result.push(member);
            }
        }
        result
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("membershipAdded")]
    fn membership_added_event(&self, #[indexed] member: &ManagedAddress, stake: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("membershipStake")]
    fn membership_stake(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("members")]
    fn members(&self) -> UnorderedSetMapper<ManagedAddress>;
}
