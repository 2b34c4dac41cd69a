//! Musical terminology index
//!
//! Static lookup from `(classification, subtype)` to a human-readable
//! name/description pair. Populated once at startup from a literal table
//! and never written afterwards. Buckets are ordered vectors so the
//! "first entry" fallback is deterministic.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::ElementClassification;

/// A terminology entry shown in the hover tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// One classification's bucket: subtype key → entry, in insertion order
type Bucket = Vec<(&'static str, TermEntry)>;

/// Read-only terminology index, keyed by classification bucket
pub struct TermIndex {
    notes: Bucket,
    clefs: Bucket,
    time_signatures: Bucket,
    key_signatures: Bucket,
    dynamics: Bucket,
    articulations: Bucket,
}

impl TermIndex {
    /// Look up the entry for a `(classification, subtype)` pair
    ///
    /// A known subtype returns its exact entry. An unknown or absent
    /// subtype falls back to the bucket's first entry. An empty bucket
    /// returns `None` and the tooltip is suppressed.
    pub fn lookup(
        &self,
        classification: ElementClassification,
        subtype: Option<&str>,
    ) -> Option<&TermEntry> {
        let bucket = self.bucket(classification);
        if let Some(key) = subtype {
            if let Some((_, entry)) = bucket.iter().find(|(k, _)| *k == key) {
                return Some(entry);
            }
        }
        bucket.first().map(|(_, entry)| entry)
    }

    fn bucket(&self, classification: ElementClassification) -> &[(&'static str, TermEntry)] {
        match classification {
            ElementClassification::Note => &self.notes,
            ElementClassification::Clef => &self.clefs,
            ElementClassification::TimeSignature => &self.time_signatures,
            ElementClassification::KeySignature => &self.key_signatures,
            ElementClassification::Dynamic => &self.dynamics,
            ElementClassification::Articulation => &self.articulations,
        }
    }
}

const fn entry(name: &'static str, description: &'static str) -> TermEntry {
    TermEntry { name, description }
}

/// The process-wide terminology table (Vietnamese learner-facing text)
pub static TERMS: Lazy<TermIndex> = Lazy::new(|| TermIndex {
    notes: vec![
        (
            "whole",
            entry("Nốt tròn", "Nốt nhạc kéo dài 4 phách"),
        ),
        (
            "half",
            entry("Nốt trắng", "Nốt nhạc kéo dài 2 phách"),
        ),
        (
            "quarter",
            entry("Nốt đen", "Nốt nhạc kéo dài 1 phách"),
        ),
        (
            "eighth",
            entry("Nốt móc đơn", "Nốt nhạc kéo dài 1/2 phách"),
        ),
        (
            "sixteenth",
            entry("Nốt móc kép", "Nốt nhạc kéo dài 1/4 phách"),
        ),
    ],
    clefs: vec![
        (
            "treble",
            entry("Khóa Sol", "Ký hiệu nhạc xác định vị trí nốt Sol trên khuông nhạc"),
        ),
        (
            "bass",
            entry("Khóa Fa", "Ký hiệu nhạc xác định vị trí nốt Fa trên khuông nhạc"),
        ),
    ],
    time_signatures: vec![
        (
            "common",
            entry(
                "Nhịp 4/4",
                "Chỉ định có 4 phách trong một ô nhịp, mỗi phách là một nốt đen",
            ),
        ),
        (
            "threeQuarter",
            entry(
                "Nhịp 3/4",
                "Chỉ định có 3 phách trong một ô nhịp, mỗi phách là một nốt đen",
            ),
        ),
    ],
    key_signatures: vec![
        (
            "CMajor",
            entry(
                "Giọng Đô trưởng",
                "Không có dấu hóa, tất cả các nốt đều là nốt tự nhiên",
            ),
        ),
        (
            "GMajor",
            entry("Giọng Sol trưởng", "Có một dấu thăng ở nốt Fa"),
        ),
    ],
    dynamics: vec![
        ("forte", entry("Forte (f)", "Chơi to")),
        ("piano", entry("Piano (p)", "Chơi nhẹ")),
        ("crescendo", entry("Crescendo", "Chơi to dần")),
    ],
    articulations: vec![
        ("staccato", entry("Staccato", "Chơi ngắt quãng, tách biệt")),
        ("legato", entry("Legato", "Chơi liền tiếng")),
    ],
});
