use crate::{
    analysis::{AnalysisOutcome, ImagePreview, Notice, NoticeLevel},
    report::ParsedReport,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt::Write as _;

const TITLE: &str = "Visual Medical Assistant AI 👨🏻‍⚕️";
const SUBTITLE: &str = "An AI crafted for medical analysis using images ❤️‍🩹";
const REPORT_HEADING: &str = "Detailed Analysis Report 📝";

const STYLE: &str = r#"
body { background-color: #2f2f2f; color: #ddd; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 32px 24px; }
h1, h2 { color: #4CAF50; }
.generated-text { color: white; white-space: pre-wrap; line-height: 1.5; }
.uploader { background-color: #444; border: 1px solid #4CAF50; border-radius: 10px; color: white; padding: 20px; }
.uploader:hover { border: 1px solid #45a049; }
.uploader label { font-size: 18px; display: block; margin-bottom: 12px; }
button { background-color: #4CAF50; color: white; border: none; padding: 10px 20px; font-size: 16px; cursor: pointer; margin-top: 12px; }
button:hover { background-color: #45a049; }
.notice { border-radius: 6px; padding: 12px 16px; margin: 12px 0; }
.notice-success { background-color: #1e4620; color: #c8e6c9; }
.notice-warning { background-color: #5a4a12; color: #ffecb3; }
.notice-error { background-color: #5c1f1f; color: #ffcdd2; }
figure { margin: 16px 0; }
figcaption { font-size: 14px; color: #bbb; }
details { background-color: #3a3a3a; border-radius: 8px; margin: 10px 0; padding: 8px 16px; }
summary { cursor: pointer; font-size: 18px; color: white; padding: 6px 0; }
footer { color: #888; font-size: 12px; margin-top: 24px; }
"#;

enum Block {
    Section {
        title: String,
        body: String,
        expanded: bool,
    },
    Raw(String),
}

/// An HTML page for the browser: upload form, status banners, the uploaded
/// image and the report blocks.
#[derive(Default)]
pub struct Page {
    notices: Vec<Notice>,
    preview: Option<String>,
    blocks: Vec<Block>,
    footer: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let mut page = Self::new();
        if let Some(preview) = &outcome.preview {
            page.preview(preview);
        }
        for notice in &outcome.notices {
            page.notify(notice.clone());
        }
        match &outcome.report {
            Some(ParsedReport::Sectioned(report)) => {
                for (section, body) in report.sections() {
                    page.section(section.title(), body, section.expanded_by_default());
                }
            }
            Some(ParsedReport::Unstructured { raw_text }) => page.raw_block(raw_text),
            None => {}
        }
        page.footer = Some(format!(
            "Request {} · {}",
            outcome.request_id,
            outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        page
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn preview(&mut self, preview: &ImagePreview) {
        self.preview = Some(format!(
            "data:{};base64,{}",
            preview.mime,
            STANDARD.encode(&preview.bytes)
        ));
    }

    pub fn section(&mut self, title: impl Into<String>, body: impl Into<String>, expanded: bool) {
        self.blocks.push(Block::Section {
            title: title.into(),
            body: body.into(),
            expanded,
        });
    }

    pub fn raw_block(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Raw(text.into()));
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(html, "<title>Visual Medical Assistant AI</title>");
        let _ = writeln!(html, "<style>{}</style>", STYLE);
        html.push_str("</head>\n<body>\n<main>\n");

        let _ = writeln!(html, "<h1>{}</h1>", escape(TITLE));
        let _ = writeln!(html, "<h2>{}</h2>", escape(SUBTITLE));

        html.push_str(UPLOAD_FORM);

        if let Some(src) = &self.preview {
            let _ = writeln!(
                html,
                "<figure><img src=\"{}\" width=\"200\" alt=\"Uploaded image\"><figcaption>✅ Uploaded image</figcaption></figure>",
                escape(src)
            );
        }

        for notice in &self.notices {
            let class = match notice.level {
                NoticeLevel::Success => "notice-success",
                NoticeLevel::Warning => "notice-warning",
                NoticeLevel::Error => "notice-error",
            };
            let _ = writeln!(
                html,
                "<div class=\"notice {}\" role=\"status\">{}</div>",
                class,
                escape(&notice.message)
            );
        }

        // The heading follows a successful model call, with or without sections.
        let succeeded = self
            .notices
            .iter()
            .any(|n| matches!(n.level, NoticeLevel::Success));
        if succeeded || self.blocks.iter().any(|b| matches!(b, Block::Section { .. })) {
            let _ = writeln!(html, "<h2>{}</h2>", escape(REPORT_HEADING));
        }

        for block in &self.blocks {
            match block {
                Block::Section {
                    title,
                    body,
                    expanded,
                } => {
                    let _ = writeln!(
                        html,
                        "<details{}><summary>{}</summary><div class=\"generated-text\">{}</div></details>",
                        if *expanded { " open" } else { "" },
                        escape(title),
                        escape(body)
                    );
                }
                Block::Raw(text) => {
                    let _ = writeln!(
                        html,
                        "<div class=\"generated-text raw-response\">{}</div>",
                        escape(text)
                    );
                }
            }
        }

        if let Some(footer) = &self.footer {
            let _ = writeln!(html, "<footer>{}</footer>", escape(footer));
        }

        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}

const UPLOAD_FORM: &str = r#"<form class="uploader" method="post" action="/analyze" enctype="multipart/form-data">
<label for="image">📂 Upload the image for analysis</label>
<input id="image" name="image" type="file" accept=".png,.jpg,.jpeg,image/png,image/jpeg" required>
<br>
<button type="submit">Generate Analysis</button>
</form>
"#;

fn escape(text: &str) -> String {
    escaper::encode_minimal(text)
}
