use std::collections::{BTreeMap, HashSet};

use socketed::{filter, flat_map, map};
use socketed_visualize::{serialize_html, Viz, VizError};

// word lengths -> distinct lengths -> a histogram keyed by length
fn main() -> Result<(), VizError> {
    let text = "the quick brown fox jumps over the lazy dog";
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();

    let mut viz = Viz::new(text);
    let lens = viz.step(words, map(|w: String| w.len()));
    let long = viz.step(lens.clone(), filter(|n: &usize| *n > 3));
    let distinct: HashSet<usize> = long.into_iter().collect();
    let spread = viz.step(distinct, flat_map(|n: usize| HashSet::from([n, n * 10])));

    let mut histogram = BTreeMap::new();
    viz.visit(&lens, |n: &usize| *histogram.entry(*n).or_insert(0u32) += 1);
    let histogram = viz.step(histogram, map(|count: u32| "#".repeat(count as usize)));

    let viz = viz.label(
        "word lengths".to_string(),
        format!("{} distinct, histogram {:?}", spread.len(), histogram),
    );
    println!("{}", serialize_html(&viz)?);
    Ok(())
}
