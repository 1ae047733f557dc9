//! Turns a [`GuideRequest`] into the instruction string sent to the text model.

use super::request::GuideRequest;
use super::router::{GuideSchema, PromptRevision, TopicFocus};

pub struct PromptBuilder;

impl PromptBuilder {
    const CLOSING: &'static str = "IMPORTANT: Ensure valid JSON with proper escaping and maintain the specified duration in the content. \
Return ONLY the JSON array, with no commentary before or after it.";

    pub fn build(request: &GuideRequest) -> String {
        let revision = request.revision;
        let mut prompt = format!(
            "Respond in {language}. Create {phrase} guide for {location} monument, focusing primarily on {topic}.\n",
            language = request.language.label(),
            phrase = request.duration.phrase(),
            location = request.location,
            topic = request.topic.label(),
        );

        let (min_secs, max_secs) = request.duration.seconds();
        if revision.includes_word_band() {
            let (min_words, max_words) = request.duration.word_band();
            prompt.push_str(&format!(
                "The whole guide should take {}-{} seconds to read aloud, roughly {}-{} words in total across all segments.\n",
                min_secs, max_secs, min_words, max_words
            ));
        } else {
            prompt.push_str(&format!(
                "The whole guide should take {}-{} seconds to read aloud.\n",
                min_secs, max_secs
            ));
        }

        prompt.push_str(Self::topic_style(request.topic));
        prompt.push('\n');
        prompt.push_str(&format!(
            "Write every field of every segment in {}.\n",
            request.language.label()
        ));
        prompt.push_str("Respond EXACTLY in this JSON format:\n");
        prompt.push_str(&Self::json_example(revision.schema()));
        prompt.push('\n');
        prompt.push_str(Self::CLOSING);

        prompt
    }

    pub fn topic_style(topic: TopicFocus) -> &'static str {
        match topic {
            TopicFocus::History => {
                "Stay factual and tell the story chronologically: who built it, when, and the events that shaped it."
            }
            TopicFocus::Architecture => {
                "Stay factual and move through the structure in a logical order: style, materials, construction techniques and the people who designed it."
            }
            TopicFocus::FunFacts => {
                "Each segment must be a standalone humorous or quirky fact that makes a visitor smile. Do NOT write a generic description of the site."
            }
            TopicFocus::SurprisingFacts => {
                "Each segment must be a standalone startling or counterintuitive claim that most visitors would not know. Do NOT write a generic description of the site."
            }
        }
    }

    /// Literal example of the expected array, keys in narration order.
    pub fn json_example(schema: GuideSchema) -> String {
        let mut example = String::from("[\n  {\n");
        let lines: Vec<String> = schema
            .fields()
            .iter()
            .map(|field| format!("    \"{}\": \"{}\"", field, Self::placeholder(field)))
            .collect();
        example.push_str(&lines.join(",\n"));
        example.push_str("\n  }\n]");
        example
    }

    fn placeholder(field: &str) -> &'static str {
        match field {
            "title" => "Segment Title",
            "description" => "Short description of the segment",
            _ => "Detailed paragraph about this aspect of the monument",
        }
    }

    pub fn revision_summary(revision: PromptRevision) -> String {
        format!("{} ({})", revision.label(), revision.schema().fields().join(", "))
    }
}
