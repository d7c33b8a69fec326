//! In-memory implementation of the wordnet store port.
//!
//! Installed documents are kept in install order and compiled into indexed
//! tables. Adding or removing a lexicon rebuilds the tables under the write
//! lock, so readers never observe a partially installed lexicon.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use tracing::info;
use wn_core::normalize::normalize_form;
use wn_core::{
    AdjPosition, CountRow, DefinitionRow, EntityKind, EntityRef, ExampleRow, FormQuery, FormRow,
    IliRow, IliStatus, LexiconRecord, LexiconStats, Metadata, Pos, RelationEdge, RelationFilter,
    Result, SenseRow, SynsetRow, WnError, WordRow, WordnetStore,
};

use crate::document::{LexiconDocument, RelationDoc, TextDoc, PROPOSED_ILI};

// ── Compiled records ──────────────────────────────────────────

#[derive(Debug)]
struct WordRec {
    row: WordRow,
    forms: Vec<FormRow>,
    senses: Vec<usize>,
    metadata: Metadata,
}

#[derive(Debug)]
struct SenseRec {
    row: SenseRow,
    lexicalized: bool,
    adjposition: Option<AdjPosition>,
    examples: Vec<ExampleRow>,
    counts: Vec<CountRow>,
    frames: Vec<String>,
    metadata: Metadata,
}

#[derive(Debug)]
struct SynsetRec {
    row: SynsetRow,
    members: Vec<usize>,
    proposed: Option<IliRow>,
    definitions: Vec<DefinitionRow>,
    examples: Vec<ExampleRow>,
    lexfile: Option<String>,
    lexicalized: bool,
    metadata: Metadata,
}

type Key = (String, String);

fn key(id: &str, lexicon: &str) -> Key {
    (id.to_string(), lexicon.to_string())
}

#[derive(Debug, Default)]
struct Tables {
    documents: Vec<LexiconDocument>,
    lexicons: Vec<LexiconRecord>,
    words: Vec<WordRec>,
    senses: Vec<SenseRec>,
    synsets: Vec<SynsetRec>,
    word_idx: HashMap<Key, usize>,
    sense_idx: HashMap<Key, usize>,
    synset_idx: HashMap<Key, usize>,
    words_by_lex: HashMap<String, Vec<usize>>,
    synsets_by_lex: HashMap<String, Vec<usize>>,
    ilis: HashMap<String, IliRow>,
    referenced_ilis: HashSet<String>,
    relations: HashMap<EntityRef, Vec<RelationEdge>>,
}

impl Tables {
    /// Compile documents, in install order, into indexed tables.
    fn build(documents: Vec<LexiconDocument>) -> Result<Self> {
        let mut t = Tables::default();
        for doc in &documents {
            t.install(doc)?;
        }
        t.documents = documents;
        Ok(t)
    }

    fn install(&mut self, doc: &LexiconDocument) -> Result<()> {
        let lex = doc.specifier();
        if self.lexicons.iter().any(|l| l.specifier() == lex) {
            return Err(WnError::Validation(format!("lexicon already installed: {lex}")));
        }
        if let Some(base) = &doc.lexicon.extends {
            if !self.lexicons.iter().any(|l| l.specifier() == base.specifier()) {
                return Err(WnError::Integrity(format!(
                    "{lex} extends {} which is not installed",
                    base.specifier()
                )));
            }
        }
        self.lexicons.push(doc.lexicon.clone());
        self.words_by_lex.entry(lex.clone()).or_default();
        self.synsets_by_lex.entry(lex.clone()).or_default();

        for ili in &doc.ilis {
            self.ilis.insert(
                ili.id.clone(),
                IliRow {
                    id: Some(ili.id.clone()),
                    status: ili.status,
                    definition: ili.definition.clone(),
                    metadata: ili.metadata.clone(),
                },
            );
        }

        // Synsets first so senses can link to them.
        for ss in doc.synsets.iter().filter(|ss| !ss.external) {
            let k = key(&ss.id, &lex);
            if self.synset_idx.contains_key(&k) {
                return Err(WnError::Integrity(format!("duplicate synset {} in {lex}", ss.id)));
            }
            let (ili, proposed) = match ss.ili.as_deref() {
                Some(PROPOSED_ILI) => (
                    None,
                    Some(IliRow {
                        id: None,
                        status: IliStatus::Proposed,
                        definition: ss.ili_definition.clone(),
                        metadata: Metadata::new(),
                    }),
                ),
                Some("") | None => (None, None),
                Some(id) => (Some(id.to_string()), None),
            };
            if let Some(id) = &ili {
                self.referenced_ilis.insert(id.clone());
            }
            let idx = self.synsets.len();
            self.synsets.push(SynsetRec {
                row: SynsetRow {
                    id: ss.id.clone(),
                    pos: ss.pos,
                    ili,
                    lexicon: lex.clone(),
                },
                members: Vec::new(),
                proposed,
                definitions: ss
                    .definitions
                    .iter()
                    .map(|d| DefinitionRow {
                        text: d.text.clone(),
                        language: d.language.clone(),
                        source_sense: d.source_sense.clone(),
                        metadata: d.metadata.clone(),
                    })
                    .collect(),
                examples: example_rows(&ss.examples),
                lexfile: ss.lexfile.clone(),
                lexicalized: ss.lexicalized,
                metadata: ss.metadata.clone(),
            });
            self.synset_idx.insert(k, idx);
            if let Some(v) = self.synsets_by_lex.get_mut(&lex) {
                v.push(idx);
            }
        }

        for entry in &doc.entries {
            let k = key(&entry.id, &lex);
            if self.word_idx.contains_key(&k) {
                return Err(WnError::Integrity(format!("duplicate entry {} in {lex}", entry.id)));
            }
            let forms = std::iter::once(&entry.lemma)
                .chain(entry.forms.iter())
                .enumerate()
                .map(|(rank, f)| {
                    let normalized = normalize_form(&f.form);
                    FormRow {
                        form: f.form.clone(),
                        id: f.id.clone(),
                        script: f.script.clone(),
                        rank: rank as u32,
                        normalized: (normalized != f.form).then_some(normalized),
                        pronunciations: f.pronunciations.clone(),
                        tags: f.tags.clone(),
                    }
                })
                .collect();
            let widx = self.words.len();
            let mut sense_ids = Vec::with_capacity(entry.senses.len());
            for sense in &entry.senses {
                let sk = key(&sense.id, &lex);
                if self.sense_idx.contains_key(&sk) {
                    return Err(WnError::Integrity(format!("duplicate sense {} in {lex}", sense.id)));
                }
                let ssidx = *self.synset_idx.get(&key(&sense.synset, &lex)).ok_or_else(|| {
                    WnError::Integrity(format!(
                        "sense {} refers to missing synset {} in {lex}",
                        sense.id, sense.synset
                    ))
                })?;
                let sidx = self.senses.len();
                self.senses.push(SenseRec {
                    row: SenseRow {
                        id: sense.id.clone(),
                        word_id: entry.id.clone(),
                        synset_id: sense.synset.clone(),
                        lexicon: lex.clone(),
                    },
                    lexicalized: sense.lexicalized,
                    adjposition: sense.adjposition,
                    examples: example_rows(&sense.examples),
                    counts: sense
                        .counts
                        .iter()
                        .map(|c| CountRow {
                            value: c.value,
                            metadata: c.metadata.clone(),
                        })
                        .collect(),
                    frames: sense.frames.clone(),
                    metadata: sense.metadata.clone(),
                });
                self.sense_idx.insert(sk, sidx);
                self.synsets[ssidx].members.push(sidx);
                sense_ids.push(sidx);
            }
            self.words.push(WordRec {
                row: WordRow {
                    id: entry.id.clone(),
                    pos: entry.pos,
                    lexicon: lex.clone(),
                },
                forms,
                senses: sense_ids,
                metadata: entry.metadata.clone(),
            });
            self.word_idx.insert(k, widx);
            if let Some(v) = self.words_by_lex.get_mut(&lex) {
                v.push(widx);
            }
        }

        // Apply declared member order.
        for ss in doc.synsets.iter().filter(|ss| !ss.external && !ss.members.is_empty()) {
            if let Some(&idx) = self.synset_idx.get(&key(&ss.id, &lex)) {
                let senses = &self.senses;
                let rank = |sidx: &usize| {
                    ss.members
                        .iter()
                        .position(|m| *m == senses[*sidx].row.id)
                        .unwrap_or(usize::MAX)
                };
                self.synsets[idx].members.sort_by_key(rank);
            }
        }

        // Relations, resolved against this lexicon then its bases.
        let search = self.resolution_order(&lex);
        for ss in &doc.synsets {
            let source = if ss.external {
                self.resolve(EntityKind::Synset, &ss.id, &search[1..])
                    .ok_or_else(|| {
                        WnError::Integrity(format!(
                            "external synset {} in {lex} not found in any base lexicon",
                            ss.id
                        ))
                    })?
            } else {
                EntityRef::new(EntityKind::Synset, &ss.id, &lex)
            };
            self.add_relations(&lex, &source, EntityKind::Synset, &ss.relations, &search)?;
        }
        for entry in &doc.entries {
            for sense in &entry.senses {
                let source = EntityRef::new(EntityKind::Sense, &sense.id, &lex);
                self.add_relations(&lex, &source, EntityKind::Sense, &sense.relations, &search)?;
                self.add_relations(
                    &lex,
                    &source,
                    EntityKind::Synset,
                    &sense.synset_relations,
                    &search,
                )?;
            }
        }

        info!(
            lexicon = %lex,
            words = doc.entries.len(),
            synsets = doc.synsets.len(),
            "installed lexicon"
        );
        Ok(())
    }

    fn add_relations(
        &mut self,
        lex: &str,
        source: &EntityRef,
        target_kind: EntityKind,
        relations: &[RelationDoc],
        search: &[String],
    ) -> Result<()> {
        for rel in relations {
            let target = self.resolve(target_kind, &rel.target, search).ok_or_else(|| {
                WnError::Integrity(format!(
                    "{} relation from {source} targets missing {target_kind} {}",
                    rel.rel_type, rel.target
                ))
            })?;
            self.relations
                .entry(source.clone())
                .or_default()
                .push(RelationEdge {
                    rel_type: rel.rel_type.clone(),
                    target,
                    lexicon: lex.to_string(),
                    metadata: rel.metadata.clone(),
                });
        }
        Ok(())
    }

    /// The lexicon itself followed by its chain of extension bases.
    fn resolution_order(&self, lex: &str) -> Vec<String> {
        let mut order = vec![lex.to_string()];
        let mut current = lex.to_string();
        while let Some(base) = self
            .lexicons
            .iter()
            .find(|l| l.specifier() == current)
            .and_then(|l| l.extends.as_ref())
            .map(|b| b.specifier())
        {
            if order.contains(&base) {
                break;
            }
            order.push(base.clone());
            current = base;
        }
        order
    }

    fn resolve(&self, kind: EntityKind, id: &str, lexicons: &[String]) -> Option<EntityRef> {
        let index = match kind {
            EntityKind::Sense => &self.sense_idx,
            EntityKind::Synset => &self.synset_idx,
            EntityKind::Word => &self.word_idx,
            EntityKind::Lexicon | EntityKind::Ili => return None,
        };
        lexicons
            .iter()
            .find(|lex| index.contains_key(&key(id, lex)))
            .map(|lex| EntityRef::new(kind, id, lex.as_str()))
    }

    // ── Query helpers ─────────────────────────────────────────

    fn word_matches(&self, word: &WordRec, q: &FormQuery) -> bool {
        if q.pos.is_some_and(|p| p != word.row.pos) {
            return false;
        }
        if let Some(ili) = &q.ili {
            let linked = word
                .senses
                .iter()
                .any(|&s| self.sense_synset(s).is_some_and(|ss| ss.row.ili.as_ref() == Some(ili)));
            if !linked {
                return false;
            }
        }
        let Some(forms) = &q.forms else {
            return true;
        };
        word.forms
            .iter()
            .filter(|f| q.search_all_forms || f.rank == 0)
            .any(|f| {
                forms.contains(&f.form)
                    || (q.normalized
                        && f.normalized.as_ref().is_some_and(|n| forms.contains(n)))
            })
    }

    fn sense_synset(&self, sidx: usize) -> Option<&SynsetRec> {
        let row = &self.senses[sidx].row;
        self.synset_idx
            .get(&key(&row.synset_id, &row.lexicon))
            .map(|&i| &self.synsets[i])
    }

    fn words_in<'a>(&'a self, lex: &str) -> impl Iterator<Item = &'a WordRec> + 'a {
        self.words_by_lex
            .get(lex)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }

    fn synsets_in<'a>(&'a self, lex: &str) -> impl Iterator<Item = &'a SynsetRec> + 'a {
        self.synsets_by_lex
            .get(lex)
            .into_iter()
            .flatten()
            .map(move |&i| &self.synsets[i])
    }

    fn ili_row(&self, id: &str) -> IliRow {
        self.ilis.get(id).cloned().unwrap_or_else(|| IliRow {
            id: Some(id.to_string()),
            status: IliStatus::Presupposed,
            definition: None,
            metadata: Metadata::new(),
        })
    }

    fn word(&self, r: &EntityRef) -> Result<&WordRec> {
        self.word_idx
            .get(&key(&r.id, &r.lexicon))
            .map(|&i| &self.words[i])
            .ok_or_else(|| WnError::not_found(EntityKind::Word, &r.id))
    }

    fn sense(&self, r: &EntityRef) -> Result<&SenseRec> {
        self.sense_idx
            .get(&key(&r.id, &r.lexicon))
            .map(|&i| &self.senses[i])
            .ok_or_else(|| WnError::not_found(EntityKind::Sense, &r.id))
    }

    fn synset(&self, r: &EntityRef) -> Result<&SynsetRec> {
        self.synset_idx
            .get(&key(&r.id, &r.lexicon))
            .map(|&i| &self.synsets[i])
            .ok_or_else(|| WnError::not_found(EntityKind::Synset, &r.id))
    }
}

fn example_rows(examples: &[TextDoc]) -> Vec<ExampleRow> {
    examples
        .iter()
        .map(|e| ExampleRow {
            text: e.text.clone(),
            language: e.language.clone(),
            metadata: e.metadata.clone(),
        })
        .collect()
}

fn count_by_pos<I: Iterator<Item = Pos>>(items: I) -> Vec<(Pos, usize)> {
    let mut counts: Vec<(Pos, usize)> = Vec::new();
    for pos in items {
        match counts.iter_mut().find(|(p, _)| *p == pos) {
            Some((_, n)) => *n += 1,
            None => counts.push((pos, 1)),
        }
    }
    counts.sort_by_key(|(p, _)| *p);
    counts
}

// ── Store ─────────────────────────────────────────────────────

/// Thread-safe in-memory wordnet store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from documents in install order.
    pub fn from_documents(documents: Vec<LexiconDocument>) -> Result<Self> {
        Ok(Self {
            tables: RwLock::new(Tables::build(documents)?),
        })
    }

    /// Install a lexicon. Fails without side effects on invalid references.
    pub fn add_document(&self, document: LexiconDocument) -> Result<()> {
        let mut tables = self.write()?;
        let mut documents = tables.documents.clone();
        documents.push(document);
        *tables = Tables::build(documents)?;
        Ok(())
    }

    /// Remove an installed lexicon by its `id:version` key.
    ///
    /// Returns `false` if no such lexicon is installed. Lexicons that other
    /// installed lexicons extend cannot be removed.
    pub fn remove_lexicon(&self, specifier: &str) -> Result<bool> {
        let mut tables = self.write()?;
        if !tables.documents.iter().any(|d| d.specifier() == specifier) {
            return Ok(false);
        }
        if let Some(ext) = tables.documents.iter().find(|d| {
            d.lexicon
                .extends
                .as_ref()
                .is_some_and(|b| b.specifier() == specifier)
        }) {
            return Err(WnError::Validation(format!(
                "cannot remove {specifier}: extended by {}",
                ext.specifier()
            )));
        }
        let documents = tables
            .documents
            .iter()
            .filter(|d| d.specifier() != specifier)
            .cloned()
            .collect();
        *tables = Tables::build(documents)?;
        info!(lexicon = %specifier, "removed lexicon");
        Ok(true)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| WnError::Store(anyhow!("memory store lock poisoned")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| WnError::Store(anyhow!("memory store lock poisoned")))
    }
}

impl WordnetStore for MemoryStore {
    fn list_lexicons(&self) -> Result<Vec<LexiconRecord>> {
        Ok(self.read()?.lexicons.clone())
    }

    fn lexicon_stats(&self, lexicon: &str) -> Result<LexiconStats> {
        let t = self.read()?;
        let mut ilis = HashSet::new();
        for ss in t.synsets_in(lexicon) {
            if let Some(ili) = &ss.row.ili {
                ilis.insert(ili.clone());
            }
        }
        Ok(LexiconStats {
            words_by_pos: count_by_pos(t.words_in(lexicon).map(|w| w.row.pos)),
            synsets_by_pos: count_by_pos(t.synsets_in(lexicon).map(|s| s.row.pos)),
            senses: t.words_in(lexicon).map(|w| w.senses.len()).sum(),
            ilis: ilis.len(),
        })
    }

    fn find_words(&self, query: &FormQuery) -> Result<Vec<WordRow>> {
        let t = self.read()?;
        Ok(query
            .lexicons
            .iter()
            .flat_map(|lex| t.words_in(lex))
            .filter(|w| t.word_matches(w, query))
            .map(|w| w.row.clone())
            .collect())
    }

    fn find_senses(&self, query: &FormQuery) -> Result<Vec<SenseRow>> {
        let t = self.read()?;
        // The ili filter applies to each sense's own synset, not the word.
        let word_query = FormQuery {
            ili: None,
            ..query.clone()
        };
        let mut out = Vec::new();
        for lex in &query.lexicons {
            for w in t.words_in(lex).filter(|w| t.word_matches(w, &word_query)) {
                for &s in &w.senses {
                    let linked = match &query.ili {
                        Some(ili) => t
                            .sense_synset(s)
                            .is_some_and(|ss| ss.row.ili.as_ref() == Some(ili)),
                        None => true,
                    };
                    if linked {
                        out.push(t.senses[s].row.clone());
                    }
                }
            }
        }
        Ok(out)
    }

    fn find_synsets(&self, query: &FormQuery) -> Result<Vec<SynsetRow>> {
        let t = self.read()?;
        let synset_ok = |ss: &SynsetRec| {
            query.pos.is_none_or(|p| p == ss.row.pos)
                && query.ili.as_ref().is_none_or(|ili| ss.row.ili.as_ref() == Some(ili))
        };
        let mut out = Vec::new();
        for lex in &query.lexicons {
            if query.forms.is_none() {
                out.extend(t.synsets_in(lex).filter(|ss| synset_ok(ss)).map(|ss| ss.row.clone()));
                continue;
            }
            let word_query = FormQuery {
                pos: None,
                ili: None,
                ..query.clone()
            };
            let mut seen = HashSet::new();
            for w in t.words_in(lex).filter(|w| t.word_matches(w, &word_query)) {
                for &s in &w.senses {
                    if let Some(ss) = t.sense_synset(s) {
                        if synset_ok(ss) && seen.insert(ss.row.id.clone()) {
                            out.push(ss.row.clone());
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    fn find_ilis(&self, status: Option<IliStatus>, lexicons: &[String]) -> Result<Vec<IliRow>> {
        let t = self.read()?;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for lex in lexicons {
            for ss in t.synsets_in(lex) {
                let row = match (&ss.row.ili, &ss.proposed) {
                    (Some(id), _) if seen.insert(id.clone()) => t.ili_row(id),
                    (None, Some(proposed)) => proposed.clone(),
                    _ => continue,
                };
                if status.is_none_or(|s| s == row.status) {
                    out.push(row);
                }
            }
        }
        Ok(out)
    }

    fn get_word(&self, id: &str, lexicon: &str) -> Result<Option<WordRow>> {
        let t = self.read()?;
        Ok(t.word_idx.get(&key(id, lexicon)).map(|&i| t.words[i].row.clone()))
    }

    fn get_sense(&self, id: &str, lexicon: &str) -> Result<Option<SenseRow>> {
        let t = self.read()?;
        Ok(t.sense_idx.get(&key(id, lexicon)).map(|&i| t.senses[i].row.clone()))
    }

    fn get_synset(&self, id: &str, lexicon: &str) -> Result<Option<SynsetRow>> {
        let t = self.read()?;
        Ok(t.synset_idx.get(&key(id, lexicon)).map(|&i| t.synsets[i].row.clone()))
    }

    fn get_ili(&self, id: &str) -> Result<Option<IliRow>> {
        let t = self.read()?;
        if t.ilis.contains_key(id) || t.referenced_ilis.contains(id) {
            Ok(Some(t.ili_row(id)))
        } else {
            Ok(None)
        }
    }

    fn proposed_ili(&self, synset: &EntityRef) -> Result<Option<IliRow>> {
        Ok(self.read()?.synset(synset)?.proposed.clone())
    }

    fn synsets_by_ili(&self, ilis: &[String], lexicons: &[String]) -> Result<Vec<SynsetRow>> {
        let t = self.read()?;
        Ok(lexicons
            .iter()
            .flat_map(|lex| t.synsets_in(lex))
            .filter(|ss| ss.row.ili.as_ref().is_some_and(|i| ilis.contains(i)))
            .map(|ss| ss.row.clone())
            .collect())
    }

    fn word_forms(&self, word: &EntityRef) -> Result<Vec<FormRow>> {
        Ok(self.read()?.word(word)?.forms.clone())
    }

    fn word_senses(&self, word: &EntityRef) -> Result<Vec<SenseRow>> {
        let t = self.read()?;
        let w = t.word(word)?;
        Ok(w.senses.iter().map(|&s| t.senses[s].row.clone()).collect())
    }

    fn synset_senses(&self, synset: &EntityRef) -> Result<Vec<SenseRow>> {
        let t = self.read()?;
        let ss = t.synset(synset)?;
        Ok(ss.members.iter().map(|&s| t.senses[s].row.clone()).collect())
    }

    fn relations(
        &self,
        source: &EntityRef,
        target_kind: EntityKind,
        types: &RelationFilter,
        lexicons: &[String],
    ) -> Result<Vec<RelationEdge>> {
        let t = self.read()?;
        Ok(t.relations
            .get(source)
            .into_iter()
            .flatten()
            .filter(|e| {
                e.target.kind == target_kind
                    && types.matches(&e.rel_type)
                    && lexicons.contains(&e.lexicon)
                    && lexicons.contains(&e.target.lexicon)
            })
            .cloned()
            .collect())
    }

    fn definitions(&self, synset: &EntityRef) -> Result<Vec<DefinitionRow>> {
        Ok(self.read()?.synset(synset)?.definitions.clone())
    }

    fn examples(&self, entity: &EntityRef) -> Result<Vec<ExampleRow>> {
        let t = self.read()?;
        match entity.kind {
            EntityKind::Sense => Ok(t.sense(entity)?.examples.clone()),
            EntityKind::Synset => Ok(t.synset(entity)?.examples.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn counts(&self, sense: &EntityRef) -> Result<Vec<CountRow>> {
        Ok(self.read()?.sense(sense)?.counts.clone())
    }

    fn frames(&self, sense: &EntityRef) -> Result<Vec<String>> {
        Ok(self.read()?.sense(sense)?.frames.clone())
    }

    fn adjposition(&self, sense: &EntityRef) -> Result<Option<AdjPosition>> {
        Ok(self.read()?.sense(sense)?.adjposition)
    }

    fn lexicalized(&self, entity: &EntityRef) -> Result<bool> {
        let t = self.read()?;
        match entity.kind {
            EntityKind::Sense => Ok(t.sense(entity)?.lexicalized),
            EntityKind::Synset => Ok(t.synset(entity)?.lexicalized),
            _ => Ok(true),
        }
    }

    fn lexfile(&self, synset: &EntityRef) -> Result<Option<String>> {
        Ok(self.read()?.synset(synset)?.lexfile.clone())
    }

    fn metadata(&self, entity: &EntityRef) -> Result<Metadata> {
        let t = self.read()?;
        match entity.kind {
            EntityKind::Lexicon => t
                .lexicons
                .iter()
                .find(|l| l.specifier() == entity.lexicon)
                .map(|l| l.metadata.clone())
                .ok_or_else(|| WnError::not_found(EntityKind::Lexicon, &entity.lexicon)),
            EntityKind::Word => Ok(t.word(entity)?.metadata.clone()),
            EntityKind::Sense => Ok(t.sense(entity)?.metadata.clone()),
            EntityKind::Synset => Ok(t.synset(entity)?.metadata.clone()),
            EntityKind::Ili => Ok(t
                .ilis
                .get(&entity.id)
                .map(|i| i.metadata.clone())
                .unwrap_or_default()),
        }
    }
}
