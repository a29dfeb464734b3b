use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};

use socketed::engine::{filter_plan, flat_map_plan, map_plan};
use socketed::{
    filter, flat_map, for_each, map, try_filter, try_flat_map, try_map, unit, Classify,
    Combinator, Compose, Pipe, Shape, Strategy,
};

use crate::fixtures::{Bag, Calls, Maybe};

fn parse_int(s: String) -> i32 {
    s.trim().parse().unwrap_or(0)
}

#[test]
fn unit_wraps_in_a_present_optional() {
    crate::init_tracing();
    let present = unit::<Option<String>>("abc");
    assert_eq!(present, Some("abc".to_string()));
}

#[test]
fn unit_builds_one_element_of_any_shape() {
    assert_eq!(unit::<Vec<u8>>(1), vec![1]);
    assert_eq!(unit::<BTreeSet<u8>>(1), BTreeSet::from([1]));
    assert_eq!(unit::<HashMap<&str, u8>>(("k", 1)), HashMap::from([("k", 1)]));
    assert_eq!(unit::<Maybe<u8>>(1), Maybe::just(1));
    assert_eq!(unit::<Bag<u8>>(1).into_vec(), vec![1]);
}

#[test]
fn present_optional_parses() {
    let out = Some("42".to_string()).pipe(map(parse_int));
    assert_eq!(out, Some(42));

    let checked = Some("42".to_string()).pipe(try_map(|s: String| s.parse::<i32>()));
    assert_eq!(checked, Ok(Some(42)));
    let rejected = Some("forty two".to_string()).pipe(try_map(|s: String| s.parse::<i32>()));
    assert!(rejected.is_err());
}

#[test]
fn absent_optional_never_calls() {
    let calls = Calls::default();
    let counted = |s: String| {
        calls.hit();
        parse_int(s)
    };

    assert_eq!(None::<String>.pipe(map(counted)), None);
    assert_eq!(Maybe::<String>::nothing().pipe(map(counted)), Maybe::nothing());
    assert_eq!(
        None::<String>.pipe(flat_map(|s: String| Some(counted(s)))),
        None
    );
    assert_eq!(
        None::<String>.pipe(try_flat_map(|s: String| Ok::<_, ()>(Some(counted(s))))),
        Ok(None)
    );
    assert_eq!(calls.get(), 0);
}

#[test]
fn pipeline_reads_left_to_right() {
    let words = vec!["3", "x", "12", "7"];
    let total: Vec<i32> = words
        .pipe(map(|s: &str| parse_int(s.to_string())))
        .pipe(filter(|n: &i32| *n > 0))
        .pipe(map(|n: i32| n * 2));
    assert_eq!(total, vec![6, 24, 14]);

    let composed = map(|s: &str| parse_int(s.to_string()))
        .then(filter(|n: &i32| *n > 0))
        .then(map(|n: i32| n * 2));
    assert_eq!(vec!["3", "x", "12", "7"].pipe(composed), vec![6, 24, 14]);
}

#[test]
fn reusable_combinators_accept_any_matching_shape() {
    let mut odd = filter(|n: &u32| n % 2 == 1);
    assert_eq!(odd.apply(vec![1u32, 2, 3]), vec![1, 3]);
    assert_eq!(odd.apply(BTreeSet::from([1u32, 2, 3])), BTreeSet::from([1, 3]));
    assert_eq!(odd.apply(Some(2u32)), None);
    assert_eq!(odd.apply(Maybe::just(5u32)), Maybe::just(5));
}

fn at_least<T: Ord>(set: BTreeSet<T>, min: &T) -> BTreeSet<T> {
    set.pipe(filter(|x: &T| x >= min))
}

#[test]
fn elements_may_borrow_from_the_caller() {
    let text = String::from("the quick brown fox jumps");
    let words: Vec<&str> = text.split(' ').collect();

    let short = (&words).pipe(filter(|w: &&str| w.len() <= 3));
    assert_eq!(short, vec!["the", "fox"]);

    let mut letters = 0;
    (&words).pipe(for_each(|w: &&str| letters += w.len()));
    assert_eq!(letters, 21);

    let checked = words.clone().pipe(try_filter(|w: &&str| match w.len() {
        0 => Err("empty word"),
        n => Ok(n > 4),
    }));
    assert_eq!(checked, Ok(vec!["quick", "brown", "jumps"]));

    let counts: BTreeMap<&str, usize> = words.iter().map(|w| (*w, w.len())).collect();
    let long = (&counts).pipe(filter(|(_, n): (&&str, &usize)| *n == 5));
    assert_eq!(long.into_keys().collect::<Vec<_>>(), vec!["brown", "jumps", "quick"]);

    // pins the word lifetime so the closure is only higher-ranked over the element borrow
    fn visit<'s, F: FnMut((&&'s str, &usize))>(f: F) -> F {
        f
    }
    let mut seen = Vec::new();
    counts.pipe(for_each(visit(|(w, _): (&&str, &usize)| seen.push(*w))));
    assert_eq!(seen, vec!["brown", "fox", "jumps", "quick", "the"]);

    let counts: BTreeMap<&str, usize> = words.iter().map(|w| (*w, w.len())).collect();
    let failed = counts.pipe(try_filter(|(w, _): (&&str, &usize)| {
        if w.starts_with('j') {
            Err(w.to_string())
        } else {
            Ok(true)
        }
    }));
    assert_eq!(failed, Err("jumps".to_string()));

    assert_eq!(at_least(BTreeSet::from([3, 1, 4, 1, 5]), &3), BTreeSet::from([3, 4, 5]));
    let owned: BTreeSet<&str> = words.into_iter().collect();
    assert_eq!(at_least(owned, &"q"), BTreeSet::from(["quick", "the"]));
}

#[test]
fn colliding_results_deduplicate() {
    let set: HashSet<i32> = [-2, -1, 0, 1, 2].into();
    assert_eq!(set.pipe(map(|x: i32| x * x)), HashSet::from([0, 1, 4]));

    // the first entry for a key wins when flattened maps collide
    let nested: BTreeMap<u8, u8> = [(1, 10), (2, 20)].into();
    let merged = nested.pipe(flat_map(|v: u8| BTreeMap::from([(0u8, v), (v, v)])));
    assert_eq!(merged, BTreeMap::from([(0, 10), (10, 10), (20, 20)]));
}

#[test]
fn fallible_flat_map_returns_the_first_error() {
    let halves = |x: u8| {
        if x % 2 == 0 {
            Ok(vec![x / 2, x / 2])
        } else {
            Err(x)
        }
    };
    assert_eq!(vec![2u8, 4].pipe(try_flat_map(halves)), Ok(vec![1, 1, 2, 2]));
    assert_eq!(vec![2u8, 3, 5].pipe(try_flat_map(halves)), Err(3));
}

#[test]
fn classification_table() {
    fn row<C: Classify>() -> (Shape, bool, bool, bool, bool) {
        let caps = C::CAPABILITIES;
        (
            C::SHAPE,
            caps.is_double_socketed(),
            caps.reservable,
            caps.erasable,
            caps.remove_ifable,
        )
    }

    assert_eq!(row::<Vec<u8>>(), (Shape::Vector, false, true, true, true));
    assert_eq!(row::<VecDeque<u8>>(), (Shape::Vector, false, true, true, true));
    assert_eq!(row::<LinkedList<u8>>(), (Shape::Vector, false, false, false, false));
    assert_eq!(row::<BinaryHeap<u8>>(), (Shape::Generic, false, true, true, false));
    assert_eq!(row::<BTreeSet<u8>>(), (Shape::Set, false, false, true, false));
    assert_eq!(row::<HashSet<u8>>(), (Shape::Set, false, true, true, false));
    assert_eq!(row::<BTreeMap<u8, u8>>(), (Shape::Map, true, false, true, false));
    assert_eq!(row::<HashMap<u8, u8>>(), (Shape::Map, true, true, true, false));
    assert_eq!(row::<Option<u8>>(), (Shape::Optional, false, false, true, false));
    assert_eq!(row::<Bag<u8>>(), (Shape::Generic, false, false, false, false));
    assert_eq!(row::<Maybe<u8>>(), (Shape::Optional, false, false, false, false));
}

#[test]
fn strategy_table_for_custom_containers() {
    assert_eq!(map_plan::<Bag<u8>, u16>().strategy, Strategy::Append);
    assert_eq!(filter_plan::<Bag<u8>>().strategy, Strategy::Rebuild);
    assert_eq!(map_plan::<Maybe<u8>, u16>().strategy, Strategy::ShortCircuit);
    assert_eq!(flat_map_plan::<Maybe<u8>, u16>().strategy, Strategy::ShortCircuit);
    assert_eq!(filter_plan::<Maybe<u8>>().strategy, Strategy::Rebuild);
    assert_eq!(filter_plan::<VecDeque<u8>>().strategy, Strategy::Compact);
    assert_eq!(filter_plan::<HashMap<u8, u8>>().strategy, Strategy::Erase);
}
