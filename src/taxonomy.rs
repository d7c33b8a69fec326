//! Hypernym/hyponym taxonomy algorithms.
//!
//! Paths run from a synset's immediate hypernym up to a root. With
//! `simulate_root`, a virtual `*ROOT*` synset is appended to every path so
//! that separate taxonomies, in one lexicon or across bridged lexicons,
//! become comparable.

use std::collections::HashSet;

use wn_core::relations::HYPERNYM_RELATIONS;
use wn_core::{Pos, RelationFilter, Result, WnError};

use crate::entities::{ScopedEntity, Synset};
use crate::relations::RelationPaths;
use crate::wordnet::Wordnet;

/// A hypernym shared by two synsets, with its depth and the shortest path
/// through it from the first synset to the second (both ends included).
#[derive(Debug, Clone)]
struct CommonHypernym {
    synset: Synset,
    depth: usize,
    path: Vec<Synset>,
}

// ── Paths and depth ───────────────────────────────────────────

fn paths_from(synset: &Synset, simulate_root: bool, include_self: bool) -> Result<Vec<Vec<Synset>>> {
    let mut paths = RelationPaths::new(synset.clone(), RelationFilter::of(HYPERNYM_RELATIONS), None)
        .collect::<Result<Vec<_>>>()?;
    if include_self {
        if paths.is_empty() {
            paths.push(vec![synset.clone()]);
        } else {
            for path in paths.iter_mut() {
                path.insert(0, synset.clone());
            }
        }
    }
    if simulate_root && !synset.is_simulated_root() {
        let root = Synset::simulated_root(synset);
        if paths.is_empty() {
            paths.push(vec![root]);
        } else {
            for path in paths.iter_mut() {
                path.push(root.clone());
            }
        }
    }
    Ok(paths)
}

/// Every maximal hypernym chain, nearest hypernym first, root last.
/// A root synset has no paths unless `simulate_root` is set.
pub fn hypernym_paths(synset: &Synset, simulate_root: bool) -> Result<Vec<Vec<Synset>>> {
    paths_from(synset, simulate_root, false)
}

/// Length of the shortest hypernym path; 0 for a root.
pub fn min_depth(synset: &Synset, simulate_root: bool) -> Result<usize> {
    Ok(hypernym_paths(synset, simulate_root)?
        .iter()
        .map(Vec::len)
        .min()
        .unwrap_or(0))
}

/// Length of the longest hypernym path; 0 for a root.
pub fn max_depth(synset: &Synset, simulate_root: bool) -> Result<usize> {
    Ok(hypernym_paths(synset, simulate_root)?
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0))
}

// ── Comparison ────────────────────────────────────────────────

/// Taxonomy comparisons need compatible parts of speech and lexicons that
/// are the same, related by extension or dependency, or bridged by expand
/// lexicons.
fn check_comparable(a: &Synset, b: &Synset) -> Result<()> {
    if !a.pos().is_compatible(b.pos()) {
        return Err(WnError::Comparison(format!(
            "{a:?} ({}) and {b:?} ({}) have different parts of speech",
            a.pos(),
            b.pos()
        )));
    }
    let (la, lb) = (a.lexicon_key(), b.lexicon_key());
    if la == lb {
        return Ok(());
    }
    let config = a.context().config();
    let expands = config.expands();
    let bridged = a.scope().iter().any(|k| k == lb)
        || b.scope().iter().any(|k| k == la)
        || expands.iter().any(|k| k == la || k == lb);
    if bridged {
        Ok(())
    } else {
        Err(WnError::Comparison(format!(
            "{a:?} and {b:?} belong to unrelated lexicons"
        )))
    }
}

/// Common hypernyms (including the synsets themselves) in the order they
/// are met along `a`'s paths.
fn common_nodes(from_a: &[Vec<Synset>], from_b: &[Vec<Synset>]) -> Vec<Synset> {
    let in_b: HashSet<(String, String)> = from_b.iter().flatten().map(|s| s.identity()).collect();
    let mut seen = HashSet::new();
    from_a
        .iter()
        .flatten()
        .filter(|s| in_b.contains(&s.identity()) && seen.insert(s.identity()))
        .cloned()
        .collect()
}

/// Shortest sub-path (ending at `pivot`) over all paths, and the pivot's
/// greatest distance from a root along any of them.
fn shortest_subpath<'a>(paths: &'a [Vec<Synset>], pivot: &Synset) -> (Option<&'a [Synset]>, usize) {
    let mut best: Option<&[Synset]> = None;
    let mut depth = 0;
    for path in paths {
        if let Some(dist) = path.iter().position(|s| s == pivot) {
            depth = depth.max(path.len() - dist - 1);
            if best.is_none_or(|b| dist + 1 < b.len()) {
                best = Some(&path[..=dist]);
            }
        }
    }
    (best, depth)
}

fn shortest_hypernym_paths(a: &Synset, b: &Synset, simulate_root: bool) -> Result<Vec<CommonHypernym>> {
    check_comparable(a, b)?;
    if a == b {
        return Ok(vec![CommonHypernym {
            synset: a.clone(),
            depth: 0,
            path: Vec::new(),
        }]);
    }
    let from_a = paths_from(a, simulate_root, true)?;
    let from_b = paths_from(b, simulate_root, true)?;

    let mut out = Vec::new();
    for pivot in common_nodes(&from_a, &from_b) {
        let (Some(up), depth_a) = shortest_subpath(&from_a, &pivot) else {
            continue;
        };
        let (Some(down), depth_b) = shortest_subpath(&from_b, &pivot) else {
            continue;
        };
        let mut path = up.to_vec();
        path.extend(down[..down.len() - 1].iter().rev().cloned());
        out.push(CommonHypernym {
            synset: pivot,
            depth: depth_a.max(depth_b),
            path,
        });
    }
    Ok(out)
}

/// The shortest path from `a` to `b` through a common hypernym, excluding
/// `a` and including `b`. Empty when `a == b`.
pub fn shortest_path(a: &Synset, b: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
    let candidates = shortest_hypernym_paths(a, b, simulate_root)?;
    let best = candidates
        .into_iter()
        .reduce(|best, c| if c.path.len() < best.path.len() { c } else { best })
        .ok_or_else(|| WnError::NoPath {
            from: a.id().to_string(),
            to: b.id().to_string(),
        })?;
    Ok(best.path.into_iter().skip(1).collect())
}

/// Hypernyms shared by `a` and `b`, each counting itself as a hypernym.
pub fn common_hypernyms(a: &Synset, b: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
    check_comparable(a, b)?;
    let from_a = paths_from(a, simulate_root, true)?;
    let from_b = paths_from(b, simulate_root, true)?;
    Ok(common_nodes(&from_a, &from_b))
}

/// The common hypernyms furthest from the root. Ties are all returned.
pub fn lowest_common_hypernyms(a: &Synset, b: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
    let candidates = shortest_hypernym_paths(a, b, simulate_root)?;
    let Some(deepest) = candidates.iter().map(|c| c.depth).max() else {
        return Ok(Vec::new());
    };
    Ok(candidates
        .into_iter()
        .filter(|c| c.depth == deepest)
        .map(|c| c.synset)
        .collect())
}

// ── Whole-taxonomy queries ────────────────────────────────────

/// Synsets of `pos`; adjectives and satellites are taken together.
fn synsets_for_pos(wordnet: &Wordnet, pos: Option<Pos>) -> Result<Vec<Synset>> {
    let mut synsets = wordnet.find_synsets(None, pos, None)?;
    match pos {
        Some(Pos::Adjective) => {
            synsets.extend(wordnet.find_synsets(None, Some(Pos::AdjectiveSatellite), None)?)
        }
        Some(Pos::AdjectiveSatellite) => {
            synsets.extend(wordnet.find_synsets(None, Some(Pos::Adjective), None)?)
        }
        _ => {}
    }
    Ok(synsets)
}

/// Synsets with no hypernyms.
pub fn roots(wordnet: &Wordnet, pos: Option<Pos>) -> Result<Vec<Synset>> {
    let mut out = Vec::new();
    for synset in synsets_for_pos(wordnet, pos)? {
        if synset.hypernyms()?.is_empty() {
            out.push(synset);
        }
    }
    Ok(out)
}

/// Synsets with no hyponyms.
pub fn leaves(wordnet: &Wordnet, pos: Option<Pos>) -> Result<Vec<Synset>> {
    let mut out = Vec::new();
    for synset in synsets_for_pos(wordnet, pos)? {
        if synset.hyponyms()?.is_empty() {
            out.push(synset);
        }
    }
    Ok(out)
}

/// The longest hypernym path of any synset of `pos`.
pub fn taxonomy_depth(wordnet: &Wordnet, pos: Pos) -> Result<usize> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut depth = 0;
    for synset in synsets_for_pos(wordnet, Some(pos))? {
        let hypernyms = synset.hypernyms()?;
        if hypernyms.iter().all(|h| seen.contains(&h.identity())) {
            continue;
        }
        for path in hypernym_paths(&synset, false)? {
            depth = depth.max(path.len());
            seen.extend(path.iter().map(|s| s.identity()));
        }
    }
    Ok(depth)
}
