//! Markdown rendering.
//!
//! One pure function: markdown source in, HTML out. GitHub-flavored
//! extensions are enabled, and fenced code blocks that declare a language
//! are syntax-highlighted. Content is a single author's own notebook, so
//! nothing is sanitized beyond what the libraries do themselves.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const THEME: &str = "InspiredGitHub";

/// Render markdown to HTML.
///
/// Returns `None` for absent or empty input; views render nothing in that
/// case. Fenced code blocks with a language tag the highlighter knows are
/// emitted as inline-styled HTML; untagged and unknown-tagged blocks come
/// out as plain `<pre><code>`.
pub fn markdown(source: Option<&str>) -> Option<String> {
    let source = source?;
    if source.is_empty() {
        return None;
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut events = Vec::new();
    let mut code: Option<(String, String)> = None; // (language, buffered text)

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                match fence_language(&info) {
                    Some(lang) => code = Some((lang, String::new())),
                    None => events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))),
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, buffer)) = code.as_mut() {
                    buffer.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if code.is_some() => {
                let (lang, buffer) = code.take().unwrap();
                events.extend(highlight(&lang, &buffer));
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    Some(out)
}

/// The language token of a fence, if it names a syntax we can highlight.
fn fence_language(info: &str) -> Option<String> {
    let token = info.split(|c: char| c == ',' || c.is_whitespace()).next()?;
    if token.is_empty() {
        return None;
    }
    SYNTAXES
        .find_syntax_by_token(token)
        .map(|_| token.to_string())
}

/// Highlighted HTML for a fenced block, or the block re-emitted plain if
/// highlighting fails.
fn highlight<'a>(lang: &str, source: &str) -> Vec<Event<'a>> {
    let theme = &THEMES.themes[THEME];
    let rendered = SYNTAXES
        .find_syntax_by_token(lang)
        .and_then(|syntax| highlighted_html_for_string(source, &SYNTAXES, syntax, theme).ok());
    match rendered {
        Some(html) => vec![Event::Html(html.into())],
        None => vec![
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                lang.to_string().into(),
            ))),
            Event::Text(source.to_string().into()),
            Event::End(TagEnd::CodeBlock),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input_renders_nothing() {
        assert_eq!(markdown(None), None);
        assert_eq!(markdown(Some("")), None);
    }

    #[test]
    fn test_plain_markdown() {
        let html = markdown(Some("# Title\n\nSome *emphasis*.")).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_gfm_table() {
        let html = markdown(Some("| a | b |\n|---|---|\n| 1 | 2 |")).unwrap();
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_tagged_fence_is_highlighted() {
        let html = markdown(Some("```rust\nfn main() {}\n```")).unwrap();
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_untagged_fence_stays_plain() {
        let html = markdown(Some("```\nfn main() {}\n```")).unwrap();
        assert!(html.contains("<code>"));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_unknown_language_stays_plain() {
        let html = markdown(Some("```nosuchlanguage\nwords\n```")).unwrap();
        assert!(html.contains("<code"));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn test_html_passes_through() {
        let html = markdown(Some("before <b>bold</b> after")).unwrap();
        assert!(html.contains("<b>bold</b>"));
    }
}
