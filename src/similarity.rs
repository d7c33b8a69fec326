//! Synset similarity metrics.
//!
//! Path-based metrics (`path`, `wup`, `lch`) work from the taxonomy alone.
//! Information-content metrics (`res`, `jcn`, `lin`) also need externally
//! computed [`IcWeights`]. Every metric requires synsets of the same part of
//! speech, with adjective satellites counted as adjectives.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;
use wn_core::{Pos, Result, WnError};

use crate::entities::{ScopedEntity, Synset};
use crate::taxonomy;
use crate::wordnet::Wordnet;

// ── Information content weights ───────────────────────────────

/// Occurrence weights for the synsets of one part of speech.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosWeights {
    /// Sum over all synsets of the part of speech.
    pub total: f64,
    /// Synset id to weight.
    pub weights: HashMap<String, f64>,
}

/// Information-content weights keyed by taxonomy part of speech.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IcWeights {
    by_pos: HashMap<Pos, PosWeights>,
}

impl IcWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `wordnet_ic` weights file for a wordnet with exactly one
    /// lexicon. Offsets map to synset ids `<lexicon>-<offset:08>-<pos>`.
    pub fn load(path: &Path, wordnet: &Wordnet) -> anyhow::Result<Self> {
        let lexicons = wordnet.lexicons()?;
        let [lexicon] = lexicons.as_slice() else {
            anyhow::bail!(
                "information content weights need a wordnet with exactly one lexicon, found {}",
                lexicons.len()
            );
        };
        let prefix = lexicon.id().to_string();
        Self::load_with(path, |offset, pos| format!("{prefix}-{offset:08}-{}", pos.as_str()))
    }

    /// Read a `wordnet_ic` weights file, naming synsets with `synset_id`.
    pub fn load_with(path: &Path, synset_id: impl Fn(u64, Pos) -> String) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let weights = Self::parse(&content, synset_id)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded information content weights from {}", path.display());
        Ok(weights)
    }

    /// Parse `wordnet_ic` text: a header line, then `<offset><pos> <weight>`
    /// lines. A trailing `ROOT` adds the weight to the part-of-speech total.
    pub fn parse(content: &str, synset_id: impl Fn(u64, Pos) -> String) -> anyhow::Result<Self> {
        let mut ic = Self::new();
        for (idx, line) in content.lines().enumerate().skip(1) {
            let lineno = idx + 1;
            let mut fields = line.split_whitespace();
            let Some(info) = fields.next() else {
                continue;
            };
            let Some((split, _)) = info.char_indices().last() else {
                continue;
            };
            let (offset, pos) = info.split_at(split);
            let pos = Pos::parse(pos)
                .with_context(|| format!("line {lineno}: unknown part of speech in {info:?}"))?;
            let offset: u64 = offset
                .parse()
                .with_context(|| format!("line {lineno}: bad synset offset in {info:?}"))?;
            let weight: f64 = fields
                .next()
                .with_context(|| format!("line {lineno}: missing weight"))?
                .parse()
                .with_context(|| format!("line {lineno}: bad weight"))?;
            ic.set_weight(pos, synset_id(offset, pos), weight);
            if fields.next() == Some("ROOT") {
                ic.by_pos.entry(pos.taxonomy_class()).or_default().total += weight;
            }
        }
        Ok(ic)
    }

    pub fn set_weight(&mut self, pos: Pos, synset_id: impl Into<String>, weight: f64) {
        self.by_pos
            .entry(pos.taxonomy_class())
            .or_default()
            .weights
            .insert(synset_id.into(), weight);
    }

    pub fn set_total(&mut self, pos: Pos, total: f64) {
        self.by_pos.entry(pos.taxonomy_class()).or_default().total = total;
    }

    pub fn weights(&self, pos: Pos) -> Option<&PosWeights> {
        self.by_pos.get(&pos.taxonomy_class())
    }

    /// Probability of the synset: its weight over the part-of-speech total.
    pub fn probability(&self, synset: &Synset) -> Result<f64> {
        let pos = synset.pos().taxonomy_class();
        let weights = self
            .weights(pos)
            .ok_or_else(|| WnError::Validation(format!("no information content weights for pos {pos}")))?;
        let weight = weights.weights.get(synset.id()).copied().ok_or_else(|| {
            WnError::Validation(format!("no information content weight for {synset:?}"))
        })?;
        if weights.total <= 0.0 || weight <= 0.0 {
            return Err(WnError::Validation(format!(
                "information content weights for {synset:?} must be positive"
            )));
        }
        Ok(weight / weights.total)
    }

    /// `-ln(probability)`.
    pub fn information_content(&self, synset: &Synset) -> Result<f64> {
        Ok(-self.probability(synset)?.ln())
    }
}

// ── Path-based metrics ────────────────────────────────────────

fn check_same_pos(a: &Synset, b: &Synset) -> Result<()> {
    if a.pos().is_compatible(b.pos()) {
        Ok(())
    } else {
        Err(WnError::Comparison(format!(
            "synsets must have the same part of speech: {} vs {}",
            a.pos(),
            b.pos()
        )))
    }
}

/// `1 / (p + 1)` for shortest path length `p`; 0.0 when no path exists.
pub fn path(a: &Synset, b: &Synset, simulate_root: bool) -> Result<f64> {
    check_same_pos(a, b)?;
    match taxonomy::shortest_path(a, b, simulate_root) {
        Ok(path) => Ok(1.0 / (path.len() as f64 + 1.0)),
        Err(WnError::NoPath { .. }) => Ok(0.0),
        Err(e) => Err(e),
    }
}

fn least_common_subsumers(a: &Synset, b: &Synset, simulate_root: bool) -> Result<Vec<Synset>> {
    let lcs = taxonomy::lowest_common_hypernyms(a, b, simulate_root)?;
    if lcs.is_empty() {
        return Err(WnError::NoPath {
            from: a.id().to_string(),
            to: b.id().to_string(),
        });
    }
    Ok(lcs)
}

/// Wu-Palmer: `2k / (i + j + 2k)` where `i` and `j` are the distances to the
/// first lowest common hypernym and `k` is its depth plus one.
pub fn wup(a: &Synset, b: &Synset, simulate_root: bool) -> Result<f64> {
    check_same_pos(a, b)?;
    let lcs = least_common_subsumers(a, b, simulate_root)?;
    let Some(lcs) = lcs.first() else {
        return Ok(0.0);
    };
    let i = taxonomy::shortest_path(a, lcs, simulate_root)?.len() as f64;
    let j = taxonomy::shortest_path(b, lcs, simulate_root)?.len() as f64;
    let k = taxonomy::max_depth(lcs, false)? as f64 + 1.0;
    Ok((2.0 * k) / (i + j + 2.0 * k))
}

/// Leacock-Chodorow: `-ln((p + 1) / (2 * max_depth))`, where `max_depth` is
/// the taxonomy depth of the part of speech.
pub fn lch(a: &Synset, b: &Synset, max_depth: usize, simulate_root: bool) -> Result<f64> {
    check_same_pos(a, b)?;
    let distance = taxonomy::shortest_path(a, b, simulate_root)?.len() as f64;
    if max_depth == 0 {
        return Err(WnError::Validation("max_depth must be greater than 0".into()));
    }
    Ok(-((distance + 1.0) / (2.0 * max_depth as f64)).ln())
}

// ── Information-content metrics ───────────────────────────────

/// Information content of the most informative lowest common hypernym.
fn lcs_information_content(a: &Synset, b: &Synset, ic: &IcWeights) -> Result<f64> {
    least_common_subsumers(a, b, false)?
        .iter()
        .map(|s| ic.information_content(s))
        .try_fold(f64::NEG_INFINITY, |best, v| v.map(|v| best.max(v)))
}

/// Resnik: the information content of the most informative lowest common
/// hypernym.
pub fn res(a: &Synset, b: &Synset, ic: &IcWeights) -> Result<f64> {
    check_same_pos(a, b)?;
    lcs_information_content(a, b, ic)
}

/// Jiang-Conrath: `1 / (IC(a) + IC(b) - 2 IC(lcs))`.
///
/// Returns 0.0 when all three are zero and `f64::INFINITY` when the
/// denominator vanishes otherwise.
pub fn jcn(a: &Synset, b: &Synset, ic: &IcWeights) -> Result<f64> {
    check_same_pos(a, b)?;
    let ic1 = ic.information_content(a)?;
    let ic2 = ic.information_content(b)?;
    let ic_lcs = lcs_information_content(a, b, ic)?;
    if ic1 == 0.0 && ic2 == 0.0 && ic_lcs == 0.0 {
        return Ok(0.0);
    }
    let denominator = ic1 + ic2 - 2.0 * ic_lcs;
    if denominator.abs() <= f64::EPSILON {
        return Ok(f64::INFINITY);
    }
    Ok(1.0 / denominator)
}

/// Lin: `2 IC(lcs) / (IC(a) + IC(b))`; 0.0 when either IC is zero.
pub fn lin(a: &Synset, b: &Synset, ic: &IcWeights) -> Result<f64> {
    check_same_pos(a, b)?;
    let ic_lcs = lcs_information_content(a, b, ic)?;
    let ic1 = ic.information_content(a)?;
    let ic2 = ic.information_content(b)?;
    if ic1 == 0.0 || ic2 == 0.0 {
        return Ok(0.0);
    }
    Ok(2.0 * ic_lcs / (ic1 + ic2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_fold_satellites_into_adjectives() {
        let mut ic = IcWeights::new();
        ic.set_weight(Pos::AdjectiveSatellite, "ss-red", 2.0);
        ic.set_total(Pos::Adjective, 8.0);
        let adj = ic.weights(Pos::Adjective).unwrap();
        assert_eq!(adj.total, 8.0);
        assert_eq!(adj.weights.get("ss-red"), Some(&2.0));
        assert!(ic.weights(Pos::Noun).is_none());
    }

    #[test]
    fn test_weights_serde_round_trip_uses_pos_codes() {
        let mut ic = IcWeights::new();
        ic.set_weight(Pos::Noun, "ss-1", 1.0);
        ic.set_total(Pos::Noun, 4.0);
        let json = serde_json::to_value(&ic).unwrap();
        assert_eq!(json["by_pos"]["n"]["total"], 4.0);
        let back: IcWeights = serde_json::from_value(json).unwrap();
        assert_eq!(back, ic);
    }

    const IC_DAT: &str = "\
wnver::eOS9lXC6GvMWznF1wkZofDdtbBU
1740n 1915712 ROOT
1930n 859272
2137n 1055337
14877v 300 ROOT

1234s 12.5
";

    #[test]
    fn test_parse_wordnet_ic_lines() {
        let ic = IcWeights::parse(IC_DAT, |offset, pos| format!("pwn-{offset:08}-{}", pos.as_str())).unwrap();
        let nouns = ic.weights(Pos::Noun).unwrap();
        assert_eq!(nouns.total, 1915712.0);
        assert_eq!(nouns.weights.len(), 3);
        assert_eq!(nouns.weights["pwn-00001930-n"], 859272.0);
        assert_eq!(ic.weights(Pos::Verb).unwrap().total, 300.0);
        let adjectives = ic.weights(Pos::Adjective).unwrap();
        assert_eq!(adjectives.weights["pwn-00001234-s"], 12.5);
        assert_eq!(adjectives.total, 0.0);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let id = |offset: u64, _pos: Pos| offset.to_string();
        let err = IcWeights::parse("header\n17q 3\n", id).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(IcWeights::parse("header\nxyzn 3\n", id).is_err());
        assert!(IcWeights::parse("header\n17n\n", id).is_err());
        assert!(IcWeights::parse("header\n17n many\n", id).is_err());
    }

    #[test]
    fn test_load_with_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ic-test.dat");
        std::fs::write(&path, "wnver::x\n42v 1.5 ROOT\n").unwrap();
        let ic = IcWeights::load_with(&path, |offset, _| format!("ss-{offset}")).unwrap();
        assert_eq!(ic.weights(Pos::Verb).unwrap().weights["ss-42"], 1.5);

        let err = IcWeights::load_with(&dir.path().join("missing.dat"), |o, _| o.to_string()).unwrap_err();
        assert!(format!("{err:#}").contains("missing.dat"));
    }
}
