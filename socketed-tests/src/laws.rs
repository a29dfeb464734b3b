use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};

use proptest::prelude::*;
use socketed::{
    filter, flat_map, for_each, map, try_filter, try_map, unit, Combinator, Compose, Pipe,
};

use crate::fixtures::{arb_option, arb_pairs, arb_values, Bag, Calls, Maybe};

fn triple(x: i32) -> i32 {
    x.wrapping_mul(3)
}

// not injective: collapses set elements
fn quarter(x: i32) -> i32 {
    x / 4
}

fn half(x: i32) -> Option<i32> {
    (x % 2 == 0).then_some(x / 2)
}

fn small(x: i32) -> Option<i32> {
    (x.abs() < 1000).then_some(x)
}

fn counted_keep(calls: &Calls) -> impl FnMut(&i32) -> bool + '_ {
    move |x| {
        calls.hit();
        x % 3 == 0
    }
}

fn counted_spread(calls: &Calls) -> impl FnMut(i32) -> BTreeSet<i32> + '_ {
    move |x| {
        calls.hit();
        BTreeSet::from([x, quarter(x)])
    }
}

proptest! {
    #[test]
    fn identity(values in arb_values(), pairs in arb_pairs(), opt in arb_option()) {
        crate::init_tracing();
        let id = |x: i32| x;

        prop_assert_eq!(values.clone().pipe(map(id)), values.clone());

        let deque: VecDeque<i32> = values.iter().copied().collect();
        prop_assert_eq!(deque.clone().pipe(map(id)), deque);

        let list: LinkedList<i32> = values.iter().copied().collect();
        prop_assert_eq!(list.clone().pipe(map(id)), list);

        let heap: BinaryHeap<i32> = values.iter().copied().collect();
        prop_assert_eq!(heap.clone().pipe(map(id)).into_sorted_vec(), heap.into_sorted_vec());

        let ordered: BTreeSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(ordered.clone().pipe(map(id)), ordered);

        let hashed: HashSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(hashed.clone().pipe(map(id)), hashed);

        let tree: BTreeMap<u8, i32> = pairs.iter().copied().collect();
        prop_assert_eq!(tree.clone().pipe(map(id)), tree);

        let table: HashMap<u8, i32> = pairs.iter().copied().collect();
        prop_assert_eq!(table.clone().pipe(map(id)), table);

        prop_assert_eq!(opt.pipe(map(id)), opt);
        prop_assert_eq!(Maybe::from(opt).pipe(map(id)), Maybe::from(opt));

        let bag = Bag::new(values);
        prop_assert_eq!(bag.clone().pipe(map(id)), bag);
    }

    #[test]
    fn composition(values in arb_values(), pairs in arb_pairs(), opt in arb_option()) {
        let fused = |x: i32| quarter(triple(x));

        prop_assert_eq!(
            values.clone().pipe(map(triple)).pipe(map(quarter)),
            values.clone().pipe(map(fused))
        );
        prop_assert_eq!(
            values.clone().pipe(map(triple).then(map(quarter))),
            values.clone().pipe(map(fused))
        );

        // sets compare after their own deduplication
        let ordered: BTreeSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(
            ordered.clone().pipe(map(triple)).pipe(map(quarter)),
            ordered.pipe(map(fused))
        );
        let hashed: HashSet<i32> = values.iter().copied().collect();
        prop_assert_eq!(
            hashed.clone().pipe(map(quarter)).pipe(map(triple)),
            hashed.pipe(map(|x: i32| triple(quarter(x))))
        );

        let tree: BTreeMap<u8, i32> = pairs.into_iter().collect();
        prop_assert_eq!(
            tree.clone().pipe(map(triple)).pipe(map(quarter)),
            tree.pipe(map(fused))
        );

        prop_assert_eq!(opt.pipe(map(triple)).pipe(map(quarter)), opt.pipe(map(fused)));

        let bag = Bag::new(values);
        prop_assert_eq!(
            bag.clone().pipe(map(triple).then(map(quarter))),
            bag.pipe(map(fused))
        );
    }

    #[test]
    fn optional_monad_laws(a in any::<i32>(), opt in arb_option()) {
        // left identity
        prop_assert_eq!(unit::<Option<i32>>(a).pipe(flat_map(half)), half(a));
        // right identity
        prop_assert_eq!(opt.pipe(flat_map(|x: i32| unit::<Option<i32>>(x))), opt);
        // associativity
        prop_assert_eq!(
            opt.pipe(flat_map(half)).pipe(flat_map(small)),
            opt.pipe(flat_map(|x: i32| half(x).pipe(flat_map(small))))
        );

        let half_m = |x: i32| Maybe::from(half(x));
        let small_m = |x: i32| Maybe::from(small(x));
        let m = Maybe::from(opt);
        prop_assert_eq!(unit::<Maybe<i32>>(a).pipe(flat_map(half_m)), half_m(a));
        prop_assert_eq!(m.pipe(flat_map(|x: i32| unit::<Maybe<i32>>(x))), m);
        prop_assert_eq!(
            m.pipe(flat_map(half_m)).pipe(flat_map(small_m)),
            m.pipe(flat_map(|x: i32| half_m(x).pipe(flat_map(small_m))))
        );
    }

    #[test]
    fn piped_and_direct_forms_agree(values in arb_values()) {
        let piped_calls = Calls::default();
        let piped = values.clone().pipe(map(|x: i32| {
            piped_calls.hit();
            triple(x)
        }));
        let direct_calls = Calls::default();
        let direct = map(|x: i32| {
            direct_calls.hit();
            triple(x)
        })
        .apply(values.clone());
        prop_assert_eq!(&piped, &direct);
        prop_assert_eq!(piped_calls.get(), direct_calls.get());
        prop_assert_eq!(piped_calls.get(), values.len());

        let ordered: BTreeSet<i32> = values.iter().copied().collect();
        let (piped_calls, direct_calls) = (Calls::default(), Calls::default());
        prop_assert_eq!(
            ordered.clone().pipe(filter(counted_keep(&piped_calls))),
            Combinator::<BTreeSet<i32>, _>::apply(&mut filter(counted_keep(&direct_calls)), ordered.clone())
        );
        prop_assert_eq!(piped_calls.get(), direct_calls.get());
        prop_assert_eq!(piped_calls.get(), ordered.len());

        let (piped_calls, direct_calls) = (Calls::default(), Calls::default());
        prop_assert_eq!(
            (&ordered).pipe(flat_map(counted_spread(&piped_calls))),
            flat_map(counted_spread(&direct_calls)).apply(ordered.clone())
        );
        prop_assert_eq!(piped_calls.get(), direct_calls.get());
        prop_assert_eq!(piped_calls.get(), ordered.len());
    }

    #[test]
    fn filter_matches_iterator_filter(values in arb_values(), pairs in arb_pairs()) {
        let keep = |x: &i32| x.rem_euclid(3) != 1;
        let expected: Vec<i32> = values.iter().copied().filter(|x| keep(x)).collect();

        prop_assert_eq!(values.clone().pipe(filter(keep)), expected.clone());

        let deque: VecDeque<i32> = values.iter().copied().collect();
        prop_assert_eq!(deque.pipe(filter(keep)).into_iter().collect::<Vec<_>>(), expected.clone());

        let list: LinkedList<i32> = values.iter().copied().collect();
        prop_assert_eq!(list.pipe(filter(keep)).into_iter().collect::<Vec<_>>(), expected.clone());

        let bag = Bag::new(values);
        prop_assert_eq!(bag.pipe(filter(keep)).into_vec(), expected);

        let tree: BTreeMap<u8, i32> = pairs.into_iter().collect();
        let kept_keys: Vec<u8> = tree
            .iter()
            .filter(|(k, _)| *k % 2 == 0)
            .map(|(k, _)| *k)
            .collect();
        let filtered = tree.pipe(filter(|(k, _): (&u8, &i32)| *k % 2 == 0));
        prop_assert_eq!(filtered.into_keys().collect::<Vec<_>>(), kept_keys);
    }

    #[test]
    fn flat_map_concatenates(values in prop::collection::vec(0u8..8, 0..32)) {
        let expand = |x: u8| vec![x; usize::from(x)];
        let expected: Vec<u8> = values.iter().copied().flat_map(expand).collect();
        prop_assert_eq!(values.clone().pipe(flat_map(expand)), expected.clone());

        let list: LinkedList<u8> = values.into_iter().collect();
        let flattened = list.pipe(flat_map(|x: u8| LinkedList::from_iter(expand(x))));
        prop_assert_eq!(flattened.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn for_each_visits_every_element(values in arb_values()) {
        let mut seen = Vec::new();
        for_each(|x: &i32| seen.push(*x)).apply(&values);
        prop_assert_eq!(seen, values);
    }

    #[test]
    fn fallible_variants_stop_at_first_error(values in arb_values()) {
        let first_negative = values.iter().position(|x| *x < 0);
        let expected_calls = first_negative.map_or(values.len(), |idx| idx + 1);

        let calls = Calls::default();
        let mapped = values.clone().pipe(try_map(|x: i32| {
            calls.hit();
            if x < 0 { Err(x) } else { Ok(i64::from(x)) }
        }));
        prop_assert_eq!(calls.get(), expected_calls);
        match first_negative {
            Some(idx) => prop_assert_eq!(mapped, Err(values[idx])),
            None => {
                let widened: Vec<i64> = values.iter().map(|x| i64::from(*x)).collect();
                prop_assert_eq!(mapped, Ok(widened))
            }
        }

        let calls = Calls::default();
        let filtered = values.clone().pipe(try_filter(|x: &i32| {
            calls.hit();
            if *x < 0 { Err(*x) } else { Ok(x % 2 == 0) }
        }));
        prop_assert_eq!(calls.get(), expected_calls);
        prop_assert_eq!(filtered.is_err(), first_negative.is_some());
    }
}

#[test]
fn filter_on_empty_never_calls() {
    crate::init_tracing();
    let calls = Calls::default();
    let never = |_: &i32| {
        calls.hit();
        false
    };

    assert!(Vec::<i32>::new().pipe(filter(never)).is_empty());
    assert!(VecDeque::<i32>::new().pipe(filter(never)).is_empty());
    assert!(LinkedList::<i32>::new().pipe(filter(never)).is_empty());
    assert!(BinaryHeap::<i32>::new().pipe(filter(never)).is_empty());
    assert!(BTreeSet::<i32>::new().pipe(filter(never)).is_empty());
    assert!(HashSet::<i32>::new().pipe(filter(never)).is_empty());
    assert_eq!(None::<i32>.pipe(filter(never)), None);
    assert_eq!(Maybe::<i32>::nothing().pipe(filter(never)), Maybe::nothing());
    assert_eq!(Bag::<i32>::new(Vec::new()).pipe(filter(never)), Bag::new(Vec::new()));

    let pairs = |_: (&u8, &i32)| {
        calls.hit();
        false
    };
    assert!(BTreeMap::<u8, i32>::new().pipe(filter(pairs)).is_empty());
    assert!(HashMap::<u8, i32>::new().pipe(filter(pairs)).is_empty());

    assert_eq!(calls.get(), 0);
}
