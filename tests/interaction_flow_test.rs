// End-to-end interaction scenarios over the pure core: pointer events in,
// tooltip state and note descriptors out.

use tutor_wasm::audio::{AudioEngine, AudioError, ContextState, SynthBackend};
use tutor_wasm::mapper;
use tutor_wasm::models::{Duration, NodeSnapshot, NoteDescriptor, Pitch, Point, Rect};
use tutor_wasm::player;
use tutor_wasm::terms::TERMS;
use tutor_wasm::tooltip::TooltipCoordinator;
use tutor_wasm::ElementClassification;

/// A note glyph on a staff, note-family tagged the way the renderer tags it
fn note_on_staff(id: usize, rect: Rect, staff: Rect) -> NodeSnapshot {
    let mut node = NodeSnapshot::bare(id, rect, vec!["vf-notehead".to_string()]);
    node.ancestor_classes = vec!["vf-note".to_string()];
    node.staff_rect = Some(staff);
    node
}

fn clef(id: usize, rect: Rect) -> NodeSnapshot {
    NodeSnapshot::bare(id, rect, vec!["vf-clef".to_string()])
}

/// Records every backend call so the audio path can be asserted end to end
#[derive(Default)]
struct RecordingBackend {
    voice: bool,
    running: bool,
    played: Vec<(String, String)>,
}

impl SynthBackend for RecordingBackend {
    fn create_voice(&mut self) -> Result<(), AudioError> {
        self.voice = true;
        Ok(())
    }

    fn has_voice(&self) -> bool {
        self.voice
    }

    fn context_state(&self) -> ContextState {
        if self.running {
            ContextState::Running
        } else {
            ContextState::Suspended
        }
    }

    fn start_context(&mut self) -> Result<(), AudioError> {
        self.running = true;
        Ok(())
    }

    fn resume_context(&mut self) -> Result<(), AudioError> {
        self.running = true;
        Ok(())
    }

    fn trigger(&mut self, note: &NoteDescriptor) -> Result<(), AudioError> {
        self.played.push((
            note.pitch.notation().to_string(),
            note.duration.token().to_string(),
        ));
        Ok(())
    }

    fn apply_volume_db(&mut self, _db: f64) {}
}

#[test]
fn test_click_on_top_staff_line_plays_c5_quarter() {
    // Staff at the container's top-left; the note's top edge sits on the
    // staff's top line
    let staff = Rect::new(0.0, 0.0, 200.0, 40.0);
    let note = note_on_staff(0, Rect::new(20.0, 0.0, 10.0, 10.0), staff);
    let candidates = vec![note];

    // Pointer within 10 units of the note center (25, 5)
    let action = player::resolve_click(Point::new(30.0, 10.0), &candidates).unwrap();
    assert_eq!(action.descriptor.pitch, Pitch::C5);
    assert_eq!(action.descriptor.duration, Duration::Quarter);
    assert_eq!(action.descriptor.duration.token(), "4n");
}

#[test]
fn test_click_to_play_reaches_the_voice() {
    let staff = Rect::new(0.0, 100.0, 200.0, 40.0);
    let candidates = vec![
        note_on_staff(0, Rect::new(20.0, 140.0, 10.0, 10.0), staff),
        note_on_staff(1, Rect::new(60.0, 100.0, 10.0, 10.0), staff),
    ];

    let mut engine = AudioEngine::new(RecordingBackend::default());

    // Click the low note, then the high note
    let low = player::resolve_click(Point::new(25.0, 145.0), &candidates).unwrap();
    engine.play_note(&low.descriptor);
    let high = player::resolve_click(Point::new(65.0, 105.0), &candidates).unwrap();
    engine.play_note(&high.descriptor);

    assert_eq!(
        engine.backend().played,
        vec![
            ("C4".to_string(), "4n".to_string()),
            ("C5".to_string(), "4n".to_string()),
        ]
    );
}

#[test]
fn test_hover_clef_shows_khoa_sol() {
    let mut coordinator = TooltipCoordinator::new();
    // Hovering 1 unit away from the clef glyph still targets the clef node
    let state = coordinator
        .pointer_enter(&clef(0, Rect::new(5.0, 10.0, 8.0, 20.0)))
        .unwrap();

    assert_eq!(state.classification, ElementClassification::Clef);
    assert_eq!(state.term.name, "Khóa Sol");
    assert_eq!(
        state.term.description,
        "Ký hiệu nhạc xác định vị trí nốt Sol trên khuông nhạc"
    );
}

#[test]
fn test_hover_then_leave_round_trip() {
    let mut coordinator = TooltipCoordinator::new();
    assert!(coordinator
        .pointer_enter(&clef(0, Rect::new(5.0, 10.0, 8.0, 20.0)))
        .is_some());
    coordinator.pointer_leave();
    assert!(coordinator.current().is_none());
}

#[test]
fn test_far_click_plays_nothing() {
    let staff = Rect::new(0.0, 0.0, 200.0, 40.0);
    let candidates = vec![note_on_staff(0, Rect::new(20.0, 0.0, 10.0, 10.0), staff)];

    // 50 units or more from the only note center: deliberate no-op
    assert!(player::resolve_click(Point::new(300.0, 300.0), &candidates).is_none());
}

#[test]
fn test_tooltip_state_serializes_with_js_facing_keys() {
    let mut coordinator = TooltipCoordinator::new();
    let state = coordinator
        .pointer_enter(&clef(0, Rect::new(5.0, 10.0, 8.0, 20.0)))
        .unwrap();

    let json = serde_json::to_value(state).unwrap();
    assert_eq!(json["classification"], "clefs");
    assert_eq!(json["term"]["name"], "Khóa Sol");
    assert_eq!(json["anchor"]["x"], 9.0);
    assert_eq!(json["anchor"]["y"], 10.0);
}

#[test]
fn test_quarter_note_term_matches_table() {
    let term = TERMS
        .lookup(ElementClassification::Note, Some("quarter"))
        .unwrap();
    assert_eq!(term.name, "Nốt đen");
    assert_eq!(term.description, "Nốt nhạc kéo dài 1 phách");
}

#[test]
fn test_classification_rules_cover_renderer_vocabulary() {
    let tags = [
        ("vf-notehead", ElementClassification::Note),
        ("vf-clef", ElementClassification::Clef),
        ("vf-timesig", ElementClassification::TimeSignature),
        ("vf-keysig", ElementClassification::KeySignature),
        ("vf-dynamics", ElementClassification::Dynamic),
        ("vf-articulation", ElementClassification::Articulation),
    ];
    for (tag, expected) in tags {
        let node = NodeSnapshot::bare(0, Rect::new(0.0, 0.0, 1.0, 1.0), vec![tag.to_string()]);
        assert_eq!(mapper::classify(&node), Some(expected), "tag {}", tag);
    }
}
