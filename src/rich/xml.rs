// Just enough XML scanning to find body paragraphs in `word/document.xml`.
//
// We never build a DOM. The scanner walks tags in document order and records
// byte spans, so a rewrite can splice new paragraph content into the original
// string and leave every other byte alone.

use std::borrow::Cow;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    SelfClosing,
    /// Declarations, comments, processing instructions, CDATA.
    Other,
}

/// One markup construct: `<name ...>`, `</name>`, `<name/>` or `<?...?>` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub kind: TagKind,
    pub name: &'a str,
    /// Byte offset of the `<`.
    pub start: usize,
    /// Byte offset just past the `>`.
    pub end: usize,
}

/// Iterator over the tags of an XML string.
pub struct Tags<'a> {
    xml: &'a str,
    pos: usize,
}

pub fn tags(xml: &str) -> Tags<'_> {
    Tags { xml, pos: 0 }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let rest = &self.xml[self.pos..];
        let start = self.pos + rest.find('<')?;
        let tail = &self.xml[start..];

        let (kind, end) = if tail.starts_with("<!--") {
            (TagKind::Other, find_after(tail, "-->")?)
        } else if tail.starts_with("<![CDATA[") {
            (TagKind::Other, find_after(tail, "]]>")?)
        } else if tail.starts_with("<?") {
            (TagKind::Other, find_after(tail, "?>")?)
        } else if tail.starts_with("<!") {
            (TagKind::Other, find_after(tail, ">")?)
        } else {
            let end = tag_end(tail)?;
            let kind = if tail.starts_with("</") {
                TagKind::Close
            } else if tail[..end].ends_with("/>") {
                TagKind::SelfClosing
            } else {
                TagKind::Open
            };
            (kind, end)
        };

        let name = match kind {
            TagKind::Other => "",
            TagKind::Close => tag_name(&tail[2..end]),
            _ => tag_name(&tail[1..end]),
        };

        self.pos = start + end;
        Some(Tag {
            kind,
            name,
            start,
            end: start + end,
        })
    }
}

fn find_after(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle).map(|i| i + needle.len())
}

/// Offset just past the closing `>` of an element tag, skipping quoted
/// attribute values (which may legally contain `>`).
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in tail.bytes().enumerate() {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn tag_name(inner: &str) -> &str {
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// A paragraph (`<w:p>`) that is a direct child of `<w:body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyParagraph {
    /// Byte span of the whole element, open tag through close tag.
    pub span: Range<usize>,
    /// Byte span of the open tag alone.
    pub open_tag: Range<usize>,
    /// Byte span of the `<w:pPr>` element, when present.
    pub properties: Option<Range<usize>>,
    /// Unescaped run text. Tabs and breaks become whitespace.
    pub text: String,
}

/// Locate every body-level paragraph, in document order.
///
/// Paragraphs inside tables or text boxes are not body-level and are skipped.
/// A self-closing `<w:p/>` has no content and is skipped as well.
pub fn body_paragraphs(xml: &str) -> Vec<BodyParagraph> {
    let mut paragraphs = Vec::new();
    let mut stack: Vec<&str> = Vec::new();

    // (stack depth of the paragraph, paragraph under construction)
    let mut current: Option<(usize, BodyParagraph)> = None;
    let mut text_open_at: Option<usize> = None;

    for tag in tags(xml) {
        match tag.kind {
            TagKind::Open => {
                if let Some((depth, para)) = current.as_mut() {
                    let nested_para = stack[*depth + 1..].contains(&"w:p");
                    if tag.name == "w:pPr" && stack.len() == *depth + 1 {
                        para.properties = Some(tag.start..tag.start);
                    } else if tag.name == "w:t" && !nested_para {
                        text_open_at = Some(tag.end);
                    }
                } else if tag.name == "w:p" && stack.last() == Some(&"w:body") {
                    current = Some((
                        stack.len(),
                        BodyParagraph {
                            span: tag.start..tag.start,
                            open_tag: tag.start..tag.end,
                            properties: None,
                            text: String::new(),
                        },
                    ));
                }
                stack.push(tag.name);
            }
            TagKind::Close => {
                stack.pop();
                let Some((depth, para)) = current.as_mut() else {
                    continue;
                };
                if tag.name == "w:t" {
                    if let Some(from) = text_open_at.take() {
                        para.text.push_str(&unescape(&xml[from..tag.start]));
                    }
                } else if tag.name == "w:pPr" && stack.len() == *depth + 1 {
                    if let Some(props) = para.properties.as_mut() {
                        props.end = tag.end;
                    }
                } else if tag.name == "w:p" && stack.len() == *depth {
                    if let Some((_, mut para)) = current.take() {
                        para.span.end = tag.end;
                        paragraphs.push(para);
                    }
                }
            }
            TagKind::SelfClosing => {
                let Some((depth, para)) = current.as_mut() else {
                    continue;
                };
                if stack[*depth + 1..].contains(&"w:p") {
                    continue;
                }
                match tag.name {
                    "w:pPr" if stack.len() == *depth + 1 => {
                        para.properties = Some(tag.start..tag.end);
                    }
                    "w:tab" => para.text.push('\t'),
                    "w:br" | "w:cr" => para.text.push('\n'),
                    _ => {}
                }
            }
            TagKind::Other => {}
        }
    }

    paragraphs
}

/// Decode the five predefined entities and numeric character references.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let decoded = after.find(';').and_then(|semi| {
            let entity = &after[1..semi];
            let ch = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Escape text for use inside an element or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body>
<w:p w:rsidR="00A1"><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Hello</w:t></w:r><w:r><w:tab/><w:t xml:space="preserve"> big &amp; bold</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p/>
<w:p><w:r><w:t>second</w:t></w:r><w:r><w:br/><w:t>line</w:t></w:r></w:p>
<w:sectPr/></w:body></w:document>"#;

    #[test]
    fn test_tag_kinds() {
        let kinds: Vec<(TagKind, &str)> = tags(r#"<?xml?><a x=">"><b/></a><!-- c -->"#)
            .map(|t| (t.kind, t.name))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (TagKind::Other, ""),
                (TagKind::Open, "a"),
                (TagKind::SelfClosing, "b"),
                (TagKind::Close, "a"),
                (TagKind::Other, ""),
            ]
        );
    }

    #[test]
    fn test_body_paragraphs_skip_tables() {
        let paras = body_paragraphs(DOC);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text, "Hello\t big & bold");
        assert_eq!(paras[1].text, "second\nline");
    }

    #[test]
    fn test_paragraph_spans() {
        let paras = body_paragraphs(DOC);
        let first = &paras[0];
        assert!(DOC[first.span.clone()].starts_with("<w:p w:rsidR"));
        assert!(DOC[first.span.clone()].ends_with("</w:p>"));
        assert_eq!(&DOC[first.open_tag.clone()], r#"<w:p w:rsidR="00A1">"#);
        let props = first.properties.clone().unwrap();
        assert_eq!(&DOC[props], r#"<w:pPr><w:pStyle w:val="Title"/></w:pPr>"#);
        assert!(paras[1].properties.is_none());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a &lt;b&gt; &amp;&quot;&apos;"), "a <b> &\"'");
        assert_eq!(unescape("&#65;&#x42;"), "AB");
        assert_eq!(unescape("AT&T; & more"), "AT&T; & more");
        assert!(matches!(unescape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_round_trips() {
        let text = r#"5 < 6 & "quotes" > 'ticks'"#;
        assert_eq!(unescape(&escape(text)), text);
    }
}
