//! Worked merge examples over posts.

use super::common::{
    ids, make_post, make_posts, make_sponsors, merge_posts, merge_u64, RecordingHooks,
};
use chunkweave::{
    get_injector, injector_at, is_injected, InjectConfig, InjectionLedger, Interleaver,
    SharedHooks,
};
use std::rc::Rc;

#[test]
fn test_one_sponsor_after_every_three_posts() {
    let (result, ledger) = merge_posts(make_posts(6), make_sponsors(100, 2), 3, 1);

    assert_eq!(ids(&result.items), vec![1, 2, 3, 100, 4, 5, 6, 101]);
    assert!(result.injected);
    assert_eq!(ledger.injected_count(), 2);
}

#[test]
fn test_two_sponsors_after_every_post() {
    let (result, _) = merge_posts(make_posts(2), make_sponsors(100, 3), 1, 2);
    assert_eq!(ids(&result.items), vec![1, 100, 101, 2, 102]);
}

#[test]
fn test_trailing_partial_chunk_gets_an_injection() {
    let (result, _) = merge_u64(vec![1, 2, 3, 4, 5], vec![100, 101, 102], 2, 1);
    assert_eq!(result.items, vec![1, 2, 100, 3, 4, 101, 5, 102]);
}

#[test]
fn test_secondary_runs_out_first() {
    let (result, ledger) = merge_u64(vec![1, 2, 3, 4, 5, 6], vec![100], 2, 1);
    assert_eq!(result.items, vec![1, 2, 100, 3, 4, 5, 6]);
    assert_eq!(ledger.injected_count(), 1);
}

#[test]
fn test_last_secondary_chunk_may_be_short() {
    let (result, _) = merge_u64(vec![1, 2], vec![100, 101, 102], 1, 2);
    assert_eq!(result.items, vec![1, 100, 101, 2, 102]);
}

#[test]
fn test_degenerate_configs_leave_primary_alone() {
    for (b, p) in [(0, 1), (1, 0), (0, 0)] {
        let (result, ledger) = merge_u64(vec![1, 2, 3], vec![100, 101], b, p);
        assert_eq!(result.items, vec![1, 2, 3], "b={} p={}", b, p);
        assert!(!result.injected);
        assert!(!ledger.has_injections());
    }
}

#[test]
fn test_template_helpers_answer_per_post() {
    let mut interleaver = Interleaver::new(chunkweave::no_hooks());
    interleaver.set_configuration(InjectConfig::new(2, 1));
    interleaver.set_secondary_items(make_sponsors(100, 1));

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(make_posts(2), &mut ledger);

    let sponsor = &result.items[2];
    let post = &result.items[0];
    assert!(is_injected(&ledger, sponsor));
    assert!(!is_injected(&ledger, post));
    assert_eq!(get_injector(&ledger, sponsor), Some(interleaver.id()));
    assert_eq!(get_injector(&ledger, post), None);
}

#[test]
fn test_two_sites_on_one_page_are_told_apart() {
    let mut ledger = InjectionLedger::new();

    let mut first = Interleaver::new(chunkweave::no_hooks());
    first.set_configuration(InjectConfig::new(2, 1));
    first.set_secondary_items(vec![100u64]);

    let mut second = Interleaver::new(chunkweave::no_hooks());
    second.set_configuration(InjectConfig::new(1, 1));
    second.set_secondary_items(vec![200u64, 201]);

    let page = first.inject(vec![1, 2], &mut ledger).into_items();
    let page = second.inject(page, &mut ledger).into_items();

    assert_eq!(page, vec![1, 200, 2, 201, 100]);
    assert_eq!(ledger.tagged_by(first.id()), vec![100]);
    let mut from_second = ledger.tagged_by(second.id());
    from_second.sort_unstable();
    assert_eq!(from_second, vec![200, 201]);
}

#[test]
fn test_featured_post_already_on_the_page_is_told_apart() {
    let featured = make_post(2).with_meta("featured", "1");
    let mut primary = make_posts(4);
    primary[1] = featured.clone();

    let mut interleaver = Interleaver::new(chunkweave::no_hooks());
    interleaver.set_configuration(InjectConfig::new(2, 1));
    interleaver.set_secondary_items(vec![featured]);

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(primary, &mut ledger);

    assert_eq!(ids(&result.items), vec![1, 2, 2, 3, 4]);
    assert!(!ledger.is_injected_at(1));
    assert_eq!(injector_at(&ledger, 2), Some(interleaver.id()));
    assert_eq!(ledger.injected_count(), 1);
}

#[test]
fn test_two_sites_placing_the_same_sponsor_each_keep_a_tag() {
    let mut ledger = InjectionLedger::new();

    let mut site_a = Interleaver::new(chunkweave::no_hooks());
    site_a.set_configuration(InjectConfig::new(1, 1));
    site_a.set_secondary_items(vec![100u64]);

    let mut site_b = Interleaver::new(chunkweave::no_hooks());
    site_b.set_configuration(InjectConfig::new(2, 1));
    site_b.set_secondary_items(vec![100u64]);

    let page = site_a.inject(vec![1, 2], &mut ledger).into_items();
    let page = site_b.inject(page, &mut ledger).into_items();

    assert_eq!(page, vec![1, 100, 100, 2]);
    assert_eq!(ledger.tagged_by(site_a.id()), vec![100]);
    assert_eq!(ledger.tagged_by(site_b.id()), vec![100]);
    assert_eq!(
        ledger.injectors(),
        vec![None, Some(site_a.id()), Some(site_b.id()), None]
    );
}

#[test]
fn test_recording_hooks_see_the_merge() {
    let hooks = Rc::new(RecordingHooks::default());
    let mut interleaver = Interleaver::new(hooks.clone() as SharedHooks<u64>);
    interleaver.set_configuration(InjectConfig::new(3, 1));
    interleaver.set_secondary_items(vec![100, 101]);

    let mut ledger = InjectionLedger::new();
    interleaver.inject(vec![1, 2, 3, 4, 5, 6], &mut ledger);

    assert_eq!(
        hooks.events(),
        vec!["before 2 6", "after 8 2", "post 8 true"]
    );
}
