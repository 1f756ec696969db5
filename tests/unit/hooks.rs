//! Hook chains around a real merge.

use chunkweave::{
    HookChain, InjectConfig, InjectHooks, InjectionLedger, InjectorId, Interleaver, QueryArgs,
    SharedHooks,
};
use std::rc::Rc;

/// Drops every injected item whose id is odd.
struct DropOddSponsors;

impl InjectHooks<u64> for DropOddSponsors {
    fn post_process(
        &self,
        merged: Vec<u64>,
        injected: bool,
        _: &Interleaver<u64>,
        secondary: &[u64],
    ) -> Vec<u64> {
        if !injected {
            return merged;
        }
        merged
            .into_iter()
            .filter(|id| !(secondary.contains(id) && id % 2 == 1))
            .collect()
    }
}

/// Caps the list length.
struct Cap(usize);

impl InjectHooks<u64> for Cap {
    fn post_process(
        &self,
        mut merged: Vec<u64>,
        _: bool,
        _: &Interleaver<u64>,
        _: &[u64],
    ) -> Vec<u64> {
        merged.truncate(self.0);
        merged
    }

    fn filter_query_args(&self, mut args: QueryArgs, _: InjectorId, _: &InjectConfig) -> QueryArgs {
        args.filters
            .insert("cap".to_string(), serde_json::json!(self.0));
        args
    }
}

#[test]
fn test_chain_threads_post_process_in_order() {
    let chain = HookChain::with_hooks(vec![
        Rc::new(DropOddSponsors) as SharedHooks<u64>,
        Rc::new(Cap(4)) as SharedHooks<u64>,
    ]);
    let mut interleaver = Interleaver::new(chain.into_shared());
    interleaver.set_configuration(InjectConfig::new(1, 1));
    interleaver.set_secondary_items(vec![100, 101, 102]);

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(vec![1, 2, 3], &mut ledger);

    // [1,100,2,101,3,102] -> drop 101 -> [1,100,2,3,102] -> cap 4
    assert_eq!(result.items, vec![1, 100, 2, 3]);
    assert!(result.injected);
    // the ledger follows the list the hooks hand back
    assert!(!ledger.contains(&101));
    assert_eq!(ledger.injectors().len(), 4);
    assert_eq!(ledger.tagged_by(interleaver.id()), vec![100]);
}

#[test]
fn test_chain_filters_query_args() {
    let mut chain: HookChain<u64> = HookChain::new();
    chain.push(Rc::new(Cap(7)));
    assert_eq!(chain.len(), 1);

    let args = chain.filter_query_args(
        QueryArgs::default(),
        InjectorId::new(),
        &InjectConfig::default(),
    );
    assert_eq!(args.filters.get("cap"), Some(&serde_json::json!(7)));
}
