use super::*;
use crate::postprocessing::{provider_error_segment, GuideSegment};
use crate::preprocessing::GuideRequest;
use crate::speech::{AudioClip, SpeechError};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn outcome(revision: PromptRevision, narrations: Vec<SegmentNarration>) -> GuideOutcome {
    let request = GuideRequest::new(
        "Eiffel Tower",
        DurationTier::Story,
        TopicFocus::History,
        Language::English,
    )
    .unwrap()
    .with_revision(revision);

    GuideOutcome {
        request_id: Uuid::nil(),
        request,
        schema: revision.schema(),
        method: Some(ParsingMethod::Strict),
        error: None,
        narrations,
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    }
}

fn narrated(number: usize, segment: GuideSegment) -> SegmentNarration {
    SegmentNarration {
        number,
        text: String::new(),
        segment,
        audio: Ok(AudioClip::mp3(vec![0u8, 1, 2])),
    }
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
    );
}

#[test]
fn test_empty_page_has_form_and_no_guide() {
    let page = render_page(&PageModel::default());

    assert!(page.contains("<title>AI Local Guide</title>"));
    assert!(page.contains(r#"action="/generate""#));
    assert!(page.contains("Generate Guide"));
    assert!(!page.contains("<details>"));
    // Default revision hides the voice selector.
    assert!(page.contains(r#"<div id="voice-field" hidden>"#));
}

#[test]
fn test_form_echoes_selections() {
    let selections = Selections {
        location: "Taj \"Mahal\"".to_string(),
        duration: Some("Long Story".to_string()),
        language: Some("Hindi".to_string()),
        revision: Some("v1".to_string()),
        voice: Some("nova".to_string()),
        ..Selections::default()
    };
    let page = render_page(&PageModel::new(selections));

    assert!(page.contains(r#"value="Taj &quot;Mahal&quot;""#));
    assert!(page.contains(r#"<option value="Long Story" selected>"#));
    assert!(page.contains(r#"<option value="Hindi" selected>"#));
    assert!(page.contains(r#"<option value="nova" selected>Energetic and bright</option>"#));
    assert!(page.contains(r#"<div id="voice-field">"#));
}

#[test]
fn test_segments_render_in_order_with_audio() {
    let guide = outcome(
        PromptRevision::V3,
        vec![
            narrated(1, GuideSegment::new("Origins", "Built in 1889.")),
            narrated(2, GuideSegment::new("Iron", "Puddled iron.")),
        ],
    );
    let page = render_page(&PageModel::default().with_guide(guide));

    let first = page.find("Segment 1: Origins").unwrap();
    let second = page.find("Segment 2: Iron").unwrap();
    assert!(first < second);
    assert!(page.contains("<strong>Content:</strong> Built in 1889."));
    assert!(page.contains(r#"<source src="data:audio/mp3;base64,AAEC" type="audio/mp3">"#));
    assert!(!page.contains("Description:"));
    assert!(page.contains("Prompt revision v3 (title, content)"));
    assert!(page.contains("2024-05-01 12:30:00 UTC"));
}

#[test]
fn test_described_schema_shows_description_placeholder() {
    let guide = outcome(
        PromptRevision::V1,
        vec![narrated(1, GuideSegment::new("Origins", "Built in 1889."))],
    );
    let page = render_page(&PageModel::default().with_guide(guide));

    assert!(page.contains("<strong>Description:</strong> No description"));
}

#[test]
fn test_segment_text_is_escaped() {
    let guide = outcome(
        PromptRevision::V3,
        vec![narrated(
            1,
            GuideSegment::new("<script>alert(1)</script>", "a < b & c"),
        )],
    );
    let page = render_page(&PageModel::default().with_guide(guide));

    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("Segment 1: &lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(page.contains("a &lt; b &amp; c"));
}

#[test]
fn test_failed_audio_shows_error_in_panel() {
    let guide = outcome(
        PromptRevision::V3,
        vec![SegmentNarration {
            number: 1,
            text: "T. C".to_string(),
            segment: GuideSegment::new("T", "C"),
            audio: Err(SpeechError::EmptyAudio),
        }],
    );
    let page = render_page(&PageModel::default().with_guide(guide));

    assert!(page.contains("Error generating audio: Speech API returned no audio"));
    assert!(!page.contains("<audio"));
}

#[test]
fn test_provider_error_banner_and_segment() {
    let mut guide = outcome(
        PromptRevision::V3,
        vec![narrated(1, provider_error_segment("Request timeout"))],
    );
    guide.method = None;
    guide.error = Some("Error generating guide: Request timeout".to_string());
    let page = render_page(&PageModel::default().with_guide(guide));

    assert!(page.contains(
        r#"<div class="banner error">Error generating guide: Request timeout</div>"#
    ));
    assert!(page.contains("Segment 1: Error"));
    assert!(page.contains("parse: provider error"));
}

#[test]
fn test_warning_banner() {
    let page = render_page(
        &PageModel::default().with_banner(Banner::warning("Please enter a monument location")),
    );
    assert!(page.contains(
        r#"<div class="banner warning">Please enter a monument location</div>"#
    ));
}
