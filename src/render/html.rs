//! Static page assets and escaping.

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub const CSS: &str = r#"
        body {
            font-family: Arial, sans-serif;
            background: linear-gradient(to bottom, #e0f7fa, #e3f2fd);
            color: #333;
            max-width: 860px;
            margin: 0 auto;
            padding: 24px;
        }
        h1 { margin-bottom: 16px; }
        form { display: grid; gap: 12px; }
        .columns { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
        label { font-weight: bold; display: block; margin-bottom: 4px; }
        input[type=text], select { width: 100%; padding: 8px; box-sizing: border-box; }
        button {
            background-color: #4CAF50;
            color: white;
            padding: 10px 20px;
            border-radius: 5px;
            border: none;
            cursor: pointer;
            justify-self: start;
        }
        button:hover { background-color: #45a049; }
        .banner { padding: 10px 14px; border-radius: 5px; margin: 12px 0; }
        .banner.warning { background: #fff8e1; border: 1px solid #ffcc80; }
        .banner.error { background: #ffebee; border: 1px solid #ef9a9a; }
        details { background: white; border-radius: 5px; margin: 10px 0; padding: 10px 14px; }
        summary { cursor: pointer; font-weight: bold; }
        footer { margin-top: 24px; font-size: 0.85em; color: #666; }
"#;

/// Shows the voice selector only while the first prompt revision is chosen.
pub const JS: &str = r#"
        (function () {
            var revision = document.getElementById('revision');
            var voice = document.getElementById('voice-field');
            if (!revision || !voice) { return; }
            revision.addEventListener('change', function () {
                voice.hidden = revision.value !== 'v1';
            });
        })();
"#;
