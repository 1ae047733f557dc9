//! Server-rendered page: the selector form, banners, one expandable panel per
//! segment with its audio player, and a footer.

pub mod html;

pub use html::escape_html;

use std::fmt::Write as _;

use crate::commands::GuideOutcome;
use crate::narration::SegmentNarration;
use crate::postprocessing::ParsingMethod;
use crate::preprocessing::{
    DurationTier, GuideSchema, Language, PromptBuilder, PromptRevision, Selections, TopicFocus,
    Voice,
};

#[cfg(test)]
mod tests;

pub const PAGE_TITLE: &str = "AI Local Guide";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Warning,
    Error,
}

impl BannerKind {
    fn class(&self) -> &'static str {
        match self {
            BannerKind::Warning => "warning",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    /// Echoed back into the form so the user's choices stay selected.
    pub selections: Selections,
    pub banners: Vec<Banner>,
    pub guide: Option<GuideOutcome>,
}

impl PageModel {
    pub fn new(selections: Selections) -> Self {
        Self {
            selections,
            ..Self::default()
        }
    }

    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banners.push(banner);
        self
    }

    pub fn with_guide(mut self, guide: GuideOutcome) -> Self {
        if let Some(message) = &guide.error {
            self.banners.push(Banner::error(message.clone()));
        }
        self.guide = Some(guide);
        self
    }
}

pub fn render_page(model: &PageModel) -> String {
    let banners: String = model.banners.iter().map(render_banner).collect();
    let guide = model.guide.as_ref().map(render_guide).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <h1>&#x1F3DB; {title}</h1>
{form}
{banners}
{guide}
    <script>
{js}
    </script>
</body>
</html>"#,
        title = PAGE_TITLE,
        css = html::CSS,
        js = html::JS,
        form = render_form(&model.selections),
        banners = banners,
        guide = guide,
    )
}

fn render_banner(banner: &Banner) -> String {
    format!(
        "    <div class=\"banner {}\">{}</div>\n",
        banner.kind.class(),
        escape_html(&banner.message)
    )
}

fn selected<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

fn options<T: PartialEq + Copy>(
    all: &[T],
    current: T,
    value: impl Fn(T) -> String,
    label: impl Fn(T) -> String,
) -> String {
    all.iter().fold(String::new(), |mut out, &item| {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&value(item)),
            if item == current { " selected" } else { "" },
            escape_html(&label(item)),
        );
        out
    })
}

fn render_form(selections: &Selections) -> String {
    let duration: DurationTier = selected(selections.duration.as_deref());
    let topic: TopicFocus = selected(selections.topic.as_deref());
    let language: Language = selected(selections.language.as_deref());
    let voice: Voice = selected(selections.voice.as_deref());
    let revision: PromptRevision = selected(selections.revision.as_deref());

    format!(
        r#"    <form method="post" action="/generate">
        <div>
            <label for="location">Enter a Monument, Art Gallery, or Historical Site</label>
            <input type="text" id="location" name="location" value="{location}" placeholder="E.g., Eiffel Tower, Louvre Museum, Taj Mahal">
        </div>
        <div class="columns">
            <div>
                <label for="duration">Select Duration</label>
                <select id="duration" name="duration">{durations}</select>
            </div>
            <div>
                <label for="language">Select Language</label>
                <select id="language" name="language">{languages}</select>
            </div>
            <div>
                <label for="topic">Select Topic Focus</label>
                <select id="topic" name="topic">{topics}</select>
            </div>
            <div>
                <label for="revision">Prompt Revision</label>
                <select id="revision" name="revision">{revisions}</select>
            </div>
            <div id="voice-field"{voice_hidden}>
                <label for="voice">Select Voice</label>
                <select id="voice" name="voice">{voices}</select>
            </div>
        </div>
        <button type="submit">Generate Guide</button>
    </form>"#,
        location = escape_html(&selections.location),
        durations = options(
            &DurationTier::ALL,
            duration,
            |d| d.short_name().to_string(),
            |d| d.short_name().to_string()
        ),
        languages = options(
            &Language::ALL,
            language,
            |l| l.label().to_string(),
            |l| l.label().to_string()
        ),
        topics = options(
            &TopicFocus::ALL,
            topic,
            |t| t.label().to_string(),
            |t| t.label().to_string()
        ),
        revisions = options(
            &PromptRevision::ALL,
            revision,
            |r| r.label().to_string(),
            |r| r.label().to_string()
        ),
        voices = options(
            &Voice::ALL,
            voice,
            |v| v.id().to_string(),
            |v| v.description().to_string()
        ),
        voice_hidden = if revision.exposes_voice() { "" } else { " hidden" },
    )
}

fn render_guide(guide: &GuideOutcome) -> String {
    let mut out = String::from("    <section class=\"guide\">\n");
    for narration in &guide.narrations {
        out.push_str(&render_segment(narration, guide.schema));
    }
    out.push_str("    </section>\n");
    out.push_str(&render_footer(guide));
    out
}

fn render_segment(narration: &SegmentNarration, schema: GuideSchema) -> String {
    let segment = &narration.segment;
    let mut body = String::new();

    if schema.has_description() {
        let _ = write!(
            body,
            "<p><strong>Description:</strong> {}</p>",
            escape_html(&segment.display_description())
        );
    }
    let _ = write!(
        body,
        "<p><strong>Content:</strong> {}</p>",
        escape_html(&segment.display_content())
    );

    match &narration.audio {
        Ok(clip) => {
            let _ = write!(
                body,
                "<p><strong>&#x1F50A; Listen to Audio Guide:</strong></p>{}",
                audio_player(&clip.data_uri(), clip.mime_type)
            );
        }
        Err(e) => {
            body.push_str(&render_banner(&Banner::error(format!(
                "Error generating audio: {}",
                e
            ))));
        }
    }

    format!(
        "    <details>\n        <summary>Segment {}: {}</summary>\n        {}\n    </details>\n",
        narration.number,
        escape_html(&segment.display_title()),
        body
    )
}

/// Inline `<audio>` element for a `data:` source.
pub fn audio_player(data_uri: &str, mime_type: &str) -> String {
    format!(
        "<audio controls><source src=\"{}\" type=\"{}\">Your browser does not support the audio element.</audio>",
        data_uri, mime_type
    )
}

fn render_footer(guide: &GuideOutcome) -> String {
    let parsed = match guide.method {
        Some(ParsingMethod::Strict) => "strict",
        Some(ParsingMethod::Lenient) => "repaired",
        Some(ParsingMethod::Fallback) => "fallback",
        None => "provider error",
    };
    format!(
        "    <footer>Prompt revision {} &middot; parse: {} &middot; generated {} &middot; request {}</footer>\n",
        escape_html(&PromptBuilder::revision_summary(guide.request.revision)),
        parsed,
        guide.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        guide.request_id
    )
}
