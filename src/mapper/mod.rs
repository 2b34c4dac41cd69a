//! Score interaction mapper
//!
//! Turns pointer coordinates over the rendered score into a musical-element
//! identity and, for notes, a concrete pitch. Every function here is a pure
//! function of its inputs: no retained state, no side effects, and missing
//! geometry degrades to `None`/defaults instead of an error.

use crate::models::{Duration, ElementClassification, NodeSnapshot, Pitch, Point, PITCH_LADDER};

/// Acceptance threshold for click-to-note mapping, in container units
///
/// Distances at or above this count as "no note found": better to play
/// nothing than the wrong note.
pub const NOTE_DISTANCE_THRESHOLD: f64 = 50.0;

/// One classification rule: class tags matched exactly, then by substring
///
/// All matching is case-sensitive.
pub struct ClassificationRule {
    pub classification: ElementClassification,
    pub exact: &'static [&'static str],
    pub substring: &'static [&'static str],
}

/// Ordered classification rules; the first matching rule wins
///
/// Priority: note > clef > time signature > key signature > dynamic >
/// articulation. The tag vocabulary follows the renderer's VexFlow-style
/// class names.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        classification: ElementClassification::Note,
        exact: &["note", "vf-note", "vf-notehead"],
        substring: &["note"],
    },
    ClassificationRule {
        classification: ElementClassification::Clef,
        exact: &["clef", "vf-clef"],
        substring: &[],
    },
    ClassificationRule {
        classification: ElementClassification::TimeSignature,
        exact: &["time-signature", "vf-timesig"],
        substring: &[],
    },
    ClassificationRule {
        classification: ElementClassification::KeySignature,
        exact: &["key-signature", "vf-keysig"],
        substring: &[],
    },
    ClassificationRule {
        classification: ElementClassification::Dynamic,
        exact: &["dynamics", "vf-dynamics"],
        substring: &[],
    },
    ClassificationRule {
        classification: ElementClassification::Articulation,
        exact: &["articulation", "vf-articulation"],
        substring: &[],
    },
];

impl ClassificationRule {
    fn matches(&self, classes: &[String]) -> bool {
        classes.iter().any(|class| {
            self.exact.contains(&class.as_str())
                || self.substring.iter().any(|s| class.contains(s))
        })
    }
}

/// Classify a rendered element by its style/class tags
pub fn classify(node: &NodeSnapshot) -> Option<ElementClassification> {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&node.classes))
        .map(|rule| rule.classification)
}

/// Resolve the subtype for a classified element
///
/// An explicit renderer hint wins; otherwise the classification's
/// documented default applies. Note duration hints are normalized so a
/// notation-value token (`"4n"`) resolves like its subtype word; an
/// unrecognized hint passes through for the term table's own fallback.
/// Classifications without subtypes yield `None`.
pub fn subtype_of(node: &NodeSnapshot, classification: ElementClassification) -> Option<String> {
    let hint = match classification {
        ElementClassification::Note => node.duration_hint.as_deref().map(normalize_duration_hint),
        ElementClassification::Clef => node.clef_hint.clone(),
        ElementClassification::TimeSignature => node.time_hint.clone(),
        _ => return None,
    };
    hint.or_else(|| classification.default_subtype().map(str::to_owned))
}

fn normalize_duration_hint(hint: &str) -> String {
    Duration::from_hint(hint)
        .map(|duration| duration.subtype_key().to_owned())
        .unwrap_or_else(|| hint.to_owned())
}

/// A nearest-note hit: the candidate and its distance from the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNote<'a> {
    pub node: &'a NodeSnapshot,
    pub distance: f64,
}

/// Whether the node's ancestor chain carries a note-family tag
pub fn is_note_family(node: &NodeSnapshot) -> bool {
    // Reuse the note rule's vocabulary against the ancestor chain
    CLASSIFICATION_RULES[0].matches(&node.ancestor_classes)
}

/// Find the note candidate nearest to the pointer, if any is close enough
///
/// Candidates without a note-family ancestor or without usable geometry
/// are skipped. Ties keep the first candidate in document order. Distances
/// at or above [`NOTE_DISTANCE_THRESHOLD`] return `None`.
pub fn locate_nearest_note<'a>(
    pointer: Point,
    candidates: &'a [NodeSnapshot],
) -> Option<NearestNote<'a>> {
    let mut nearest: Option<NearestNote<'a>> = None;

    for node in candidates {
        if !is_note_family(node) || node.rect.is_degenerate() {
            continue;
        }
        let distance = pointer.distance_to(node.rect.center());
        let closer = match nearest {
            Some(ref hit) => distance < hit.distance,
            None => true,
        };
        if closer {
            nearest = Some(NearestNote { node, distance });
        }
    }

    match nearest {
        Some(hit) if hit.distance < NOTE_DISTANCE_THRESHOLD => Some(hit),
        Some(hit) => {
            log::debug!(
                "nearest note at distance {:.1} is outside the acceptance threshold",
                hit.distance
            );
            None
        }
        None => None,
    }
}

/// Map a note's vertical position on its staff to a ladder pitch
///
/// The staff's vertical extent spans the full ladder linearly: relative
/// position 0 (note top at the staff bottom) is `C4`, position 1 (note top
/// at the staff top) is `C5`. Without a usable staff rectangle the note
/// lands on the ladder midpoint. Clef and key signature are deliberately
/// ignored.
pub fn resolve_pitch(node: &NodeSnapshot) -> Pitch {
    let relative = match node.staff_rect {
        Some(staff) if !staff.is_degenerate() => (staff.bottom() - node.rect.top()) / staff.h,
        _ => 0.5,
    };

    let raw = (relative * (PITCH_LADDER.len() - 1) as f64).floor();
    Pitch::from_ladder_index(raw.max(0.0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementClassification as C, Rect};

    fn node_with_classes(classes: &[&str]) -> NodeSnapshot {
        NodeSnapshot::bare(
            0,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            classes.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn note_candidate(id: usize, rect: Rect) -> NodeSnapshot {
        let mut node = NodeSnapshot::bare(id, rect, vec![]);
        node.ancestor_classes = vec!["vf-notehead".to_string()];
        node
    }

    #[test]
    fn test_classify_exact_tags() {
        assert_eq!(classify(&node_with_classes(&["vf-clef"])), Some(C::Clef));
        assert_eq!(
            classify(&node_with_classes(&["vf-timesig"])),
            Some(C::TimeSignature)
        );
        assert_eq!(
            classify(&node_with_classes(&["key-signature"])),
            Some(C::KeySignature)
        );
        assert_eq!(
            classify(&node_with_classes(&["vf-dynamics"])),
            Some(C::Dynamic)
        );
        assert_eq!(
            classify(&node_with_classes(&["articulation"])),
            Some(C::Articulation)
        );
    }

    #[test]
    fn test_classify_note_substring() {
        assert_eq!(classify(&node_with_classes(&["vf-notehead"])), Some(C::Note));
        assert_eq!(
            classify(&node_with_classes(&["some-notelike-tag"])),
            Some(C::Note)
        );
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify(&node_with_classes(&["Clef"])), None);
        assert_eq!(classify(&node_with_classes(&["NOTE"])), None);
    }

    #[test]
    fn test_classify_priority_note_over_clef() {
        let node = node_with_classes(&["vf-clef", "vf-note"]);
        assert_eq!(classify(&node), Some(C::Note));
    }

    #[test]
    fn test_classify_no_match() {
        assert_eq!(classify(&node_with_classes(&["barline"])), None);
        assert_eq!(classify(&node_with_classes(&[])), None);
    }

    #[test]
    fn test_subtype_hint_wins_over_default() {
        let mut node = node_with_classes(&["vf-notehead"]);
        node.duration_hint = Some("eighth".to_string());
        assert_eq!(subtype_of(&node, C::Note).as_deref(), Some("eighth"));
    }

    #[test]
    fn test_subtype_normalizes_token_hints() {
        let mut node = node_with_classes(&["vf-notehead"]);
        node.duration_hint = Some("4n".to_string());
        assert_eq!(subtype_of(&node, C::Note).as_deref(), Some("quarter"));

        // An unrecognized hint is passed through untouched
        node.duration_hint = Some("breve".to_string());
        assert_eq!(subtype_of(&node, C::Note).as_deref(), Some("breve"));
    }

    #[test]
    fn test_subtype_defaults() {
        let node = node_with_classes(&[]);
        assert_eq!(subtype_of(&node, C::Note).as_deref(), Some("quarter"));
        assert_eq!(subtype_of(&node, C::Clef).as_deref(), Some("treble"));
        assert_eq!(
            subtype_of(&node, C::TimeSignature).as_deref(),
            Some("common")
        );
        assert_eq!(subtype_of(&node, C::Dynamic), None);
        assert_eq!(subtype_of(&node, C::KeySignature), None);
    }

    #[test]
    fn test_locate_nearest_within_threshold() {
        let candidates = vec![
            note_candidate(0, Rect::new(100.0, 100.0, 10.0, 10.0)),
            note_candidate(1, Rect::new(10.0, 10.0, 10.0, 10.0)),
        ];
        // Pointer right at candidate 1's center
        let hit = locate_nearest_note(Point::new(15.0, 15.0), &candidates).unwrap();
        assert_eq!(hit.node.id, 1);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_locate_nearest_is_stable() {
        let candidates = vec![note_candidate(0, Rect::new(10.0, 10.0, 10.0, 10.0))];
        let pointer = Point::new(20.0, 20.0);
        let first = locate_nearest_note(pointer, &candidates).unwrap();
        let second = locate_nearest_note(pointer, &candidates).unwrap();
        assert_eq!(first.node.id, second.node.id);
        assert_eq!(first.distance, second.distance);
    }

    #[test]
    fn test_locate_rejects_at_threshold() {
        // Center at (50, 0) with pointer at origin: distance exactly 50
        let candidates = vec![note_candidate(0, Rect::new(45.0, -5.0, 10.0, 10.0))];
        assert!(locate_nearest_note(Point::new(0.0, 0.0), &candidates).is_none());

        // One unit closer is accepted
        let candidates = vec![note_candidate(0, Rect::new(44.0, -5.0, 10.0, 10.0))];
        assert!(locate_nearest_note(Point::new(0.0, 0.0), &candidates).is_some());
    }

    #[test]
    fn test_locate_tie_break_keeps_document_order() {
        let candidates = vec![
            note_candidate(0, Rect::new(0.0, 0.0, 10.0, 10.0)),
            note_candidate(1, Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let hit = locate_nearest_note(Point::new(5.0, 5.0), &candidates).unwrap();
        assert_eq!(hit.node.id, 0);
    }

    #[test]
    fn test_locate_skips_non_note_and_degenerate() {
        let mut not_a_note = NodeSnapshot::bare(0, Rect::new(0.0, 0.0, 10.0, 10.0), vec![]);
        not_a_note.ancestor_classes = vec!["barline".to_string()];
        let degenerate = note_candidate(1, Rect::new(0.0, 0.0, 0.0, 0.0));
        let candidates = vec![not_a_note, degenerate];
        assert!(locate_nearest_note(Point::new(5.0, 5.0), &candidates).is_none());
    }

    #[test]
    fn test_locate_empty_candidates() {
        assert!(locate_nearest_note(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_resolve_pitch_staff_bottom_is_c4() {
        // Note top exactly at the staff bottom: relative position 0
        let mut node = note_candidate(0, Rect::new(0.0, 140.0, 10.0, 10.0));
        node.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 40.0));
        assert_eq!(resolve_pitch(&node), Pitch::C4);
    }

    #[test]
    fn test_resolve_pitch_staff_top_is_c5() {
        // Note top exactly at the staff top: relative position 1
        let mut node = note_candidate(0, Rect::new(0.0, 100.0, 10.0, 10.0));
        node.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 40.0));
        assert_eq!(resolve_pitch(&node), Pitch::C5);
    }

    #[test]
    fn test_resolve_pitch_without_staff_is_ladder_midpoint() {
        let node = note_candidate(0, Rect::new(0.0, 0.0, 10.0, 10.0));
        // Relative position 0.5 -> floor(3.5) -> F4
        assert_eq!(resolve_pitch(&node), Pitch::F4);
    }

    #[test]
    fn test_resolve_pitch_clamps_out_of_range_positions() {
        // Note far below the staff: negative relative position
        let mut below = note_candidate(0, Rect::new(0.0, 500.0, 10.0, 10.0));
        below.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 40.0));
        assert_eq!(resolve_pitch(&below), Pitch::C4);

        // Note far above the staff: relative position beyond 1
        let mut above = note_candidate(0, Rect::new(0.0, 0.0, 10.0, 10.0));
        above.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 40.0));
        assert_eq!(resolve_pitch(&above), Pitch::C5);
    }

    #[test]
    fn test_resolve_pitch_zero_height_staff_is_midpoint() {
        let mut node = note_candidate(0, Rect::new(0.0, 100.0, 10.0, 10.0));
        node.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 0.0));
        assert_eq!(resolve_pitch(&node), Pitch::F4);
    }

    #[test]
    fn test_resolve_pitch_always_on_ladder() {
        for y in (0..400).step_by(7) {
            let mut node = note_candidate(0, Rect::new(0.0, y as f64, 10.0, 10.0));
            node.staff_rect = Some(Rect::new(0.0, 100.0, 200.0, 40.0));
            let pitch = resolve_pitch(&node);
            assert!(PITCH_LADDER.contains(&pitch));
        }
    }
}
