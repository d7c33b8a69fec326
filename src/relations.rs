//! Relation resolution and lazy traversal.
//!
//! Synset relations are resolved in two passes:
//! 1. Edges declared in the synset's own scope.
//! 2. When expand lexicons are configured and the synset has an ILI, edges of
//!    the expand synsets sharing that ILI, mapped back through the targets'
//!    ILIs to synsets in the home scope. Targets without a home counterpart
//!    are returned as they are, belonging to the expand lexicon.
//!
//! Local targets always precede bridged ones and no target appears twice.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::iter::FusedIterator;

use tracing::debug;
use wn_core::{EntityKind, EntityRef, RelationFilter, Result, SynsetRow, WnError, WordnetStore};

use crate::entities::{dedup_entities, ScopedEntity, Sense, Synset};

/// Entities that have typed relations to entities of the same kind.
pub trait Relatable: ScopedEntity + Clone + PartialEq + Sized {
    /// Related entities paired with the relation name, in resolution order.
    fn related_with_types(&self, types: &RelationFilter) -> Result<Vec<(String, Self)>>;
}

/// Group related entities by relation name, keeping resolution order.
pub(crate) fn group_by_type<T: PartialEq>(related: Vec<(String, T)>) -> BTreeMap<String, Vec<T>> {
    let mut grouped: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for (rel_type, target) in related {
        let targets = grouped.entry(rel_type).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    grouped
}

// ── Synsets ───────────────────────────────────────────────────

fn synset_row(store: &dyn WordnetStore, target: &EntityRef) -> Result<SynsetRow> {
    store
        .get_synset(&target.id, &target.lexicon)?
        .ok_or_else(|| WnError::Integrity(format!("relation targets missing {target}")))
}

pub(crate) fn synset_relations(
    synset: &Synset,
    types: &RelationFilter,
) -> Result<Vec<(String, Synset)>> {
    let ctx = synset.context();
    let store = ctx.store();
    let scope = synset.scope();

    let mut targets = Vec::new();
    for edge in store.relations(&synset.entity_ref(), EntityKind::Synset, types, &scope)? {
        let row = synset_row(store, &edge.target)?;
        targets.push((edge.rel_type, Synset::from_row(row, ctx.clone())));
    }

    let expands = ctx.config().expands();
    let Some(ili) = synset.ili_id() else {
        return Ok(targets);
    };
    if expands.is_empty() {
        return Ok(targets);
    }

    let mut seen: HashSet<(String, String)> = targets.iter().map(|(_, t)| t.identity()).collect();
    let sources = store.synsets_by_ili(&[ili.to_string()], expands)?;
    for source in sources
        .iter()
        .filter(|row| !(row.id == synset.id() && row.lexicon == synset.lexicon_key()))
    {
        let source_ref = EntityRef::new(EntityKind::Synset, &source.id, &source.lexicon);
        for edge in store.relations(&source_ref, EntityKind::Synset, types, expands)? {
            let foreign = synset_row(store, &edge.target)?;
            let home = match &foreign.ili {
                Some(target_ili) => store.synsets_by_ili(std::slice::from_ref(target_ili), &scope)?,
                None => Vec::new(),
            };
            let bridged = if home.is_empty() {
                debug!(
                    source = %source_ref,
                    target = %edge.target,
                    "expand target has no home counterpart"
                );
                vec![foreign]
            } else {
                home
            };
            for row in bridged {
                if seen.insert((row.id.clone(), row.lexicon.clone())) {
                    targets.push((edge.rel_type.clone(), Synset::from_row(row, ctx.clone())));
                }
            }
        }
    }
    Ok(targets)
}

// ── Senses ────────────────────────────────────────────────────

pub(crate) fn sense_relations(sense: &Sense, types: &RelationFilter) -> Result<Vec<(String, Sense)>> {
    let ctx = sense.context();
    let store = ctx.store();
    let scope = sense.scope();
    let mut targets = Vec::new();
    for edge in store.relations(&sense.entity_ref(), EntityKind::Sense, types, &scope)? {
        let row = store
            .get_sense(&edge.target.id, &edge.target.lexicon)?
            .ok_or_else(|| WnError::Integrity(format!("relation targets missing {}", edge.target)))?;
        targets.push((edge.rel_type, Sense::from_row(row, ctx.clone())));
    }
    Ok(targets)
}

pub(crate) fn sense_synset_relations(
    sense: &Sense,
    types: &RelationFilter,
) -> Result<Vec<(String, Synset)>> {
    let ctx = sense.context();
    let store = ctx.store();
    let scope = sense.scope();
    let mut targets = Vec::new();
    for edge in store.relations(&sense.entity_ref(), EntityKind::Synset, types, &scope)? {
        let row = synset_row(store, &edge.target)?;
        targets.push((edge.rel_type, Synset::from_row(row, ctx.clone())));
    }
    Ok(targets)
}

fn related_nodes<T: Relatable>(node: &T, types: &RelationFilter) -> Result<Vec<T>> {
    let related = node.related_with_types(types)?;
    Ok(dedup_entities(related.into_iter().map(|(_, t)| t).collect()))
}

// ── Closure ───────────────────────────────────────────────────

/// Breadth-first transitive closure in discovery order.
///
/// The start node is never yielded, even when a cycle leads back to it. The
/// iterator stops after yielding the first error.
pub struct Closure<T: Relatable> {
    types: RelationFilter,
    start: Option<T>,
    queue: VecDeque<T>,
    visited: HashSet<(String, String)>,
    failed: bool,
}

impl<T: Relatable> Closure<T> {
    pub(crate) fn new(start: T, types: RelationFilter) -> Self {
        let visited = HashSet::from([start.identity()]);
        Self {
            types,
            start: Some(start),
            queue: VecDeque::new(),
            visited,
            failed: false,
        }
    }

    fn expand(&mut self, node: &T) -> Result<()> {
        let related = related_nodes(node, &self.types)?;
        self.queue.extend(related);
        Ok(())
    }
}

impl<T: Relatable> Iterator for Closure<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(start) = self.start.take() {
            if let Err(e) = self.expand(&start) {
                self.failed = true;
                return Some(Err(e));
            }
        }
        while let Some(node) = self.queue.pop_front() {
            if !self.visited.insert(node.identity()) {
                continue;
            }
            if let Err(e) = self.expand(&node) {
                self.failed = true;
                return Some(Err(e));
            }
            return Some(Ok(node));
        }
        None
    }
}

impl<T: Relatable> FusedIterator for Closure<T> {}

// ── Path enumeration ──────────────────────────────────────────

type Visited = HashSet<(String, String)>;

/// Depth-first enumeration of acyclic relation paths.
///
/// Paths exclude the start node. Without an `end`, every maximal path is
/// yielded; with one, only the paths reaching it.
pub struct RelationPaths<T: Relatable> {
    types: RelationFilter,
    start: Option<T>,
    end: Option<T>,
    agenda: Vec<(Vec<T>, Visited)>,
    failed: bool,
}

impl<T: Relatable> RelationPaths<T> {
    pub(crate) fn new(start: T, types: RelationFilter, end: Option<T>) -> Self {
        Self {
            types,
            start: Some(start),
            end,
            agenda: Vec::new(),
            failed: false,
        }
    }

    fn seed(&mut self, start: &T) -> Result<()> {
        let start_key = start.identity();
        for target in related_nodes(start, &self.types)?.into_iter().rev() {
            let key = target.identity();
            if key == start_key {
                continue;
            }
            let visited = HashSet::from([start_key.clone(), key]);
            self.agenda.push((vec![target], visited));
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Option<Vec<T>>> {
        while let Some((path, visited)) = self.agenda.pop() {
            let Some(last) = path.last() else {
                continue;
            };
            if self.end.as_ref().is_some_and(|end| end == last) {
                return Ok(Some(path));
            }
            let related: Vec<T> = related_nodes(last, &self.types)?
                .into_iter()
                .filter(|t| !visited.contains(&t.identity()))
                .collect();
            if related.is_empty() {
                if self.end.is_none() {
                    return Ok(Some(path));
                }
                continue;
            }
            for target in related.into_iter().rev() {
                let mut next_visited = visited.clone();
                next_visited.insert(target.identity());
                let mut next_path = path.clone();
                next_path.push(target);
                self.agenda.push((next_path, next_visited));
            }
        }
        Ok(None)
    }
}

impl<T: Relatable> Iterator for RelationPaths<T> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(start) = self.start.take() {
            if let Err(e) = self.seed(&start) {
                self.failed = true;
                return Some(Err(e));
            }
        }
        match self.step() {
            Ok(path) => path.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<T: Relatable> FusedIterator for RelationPaths<T> {}
