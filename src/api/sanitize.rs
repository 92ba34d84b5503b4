//! Whitelist HTML filter for user-supplied text.
//!
//! Known-harmless tags survive with a per-tag set of attributes; every other
//! tag is escaped into visible text, so `<script>` becomes `&lt;script&gt;`
//! and its body stays readable but inert. Text outside tags is copied as-is,
//! apart from stray angle brackets.

/// Tags allowed through, with the attributes each one may keep.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "abbr" => &["title"],
        "blockquote" => &["cite"],
        "img" => &["src", "alt", "title", "width", "height"],
        "td" | "th" => &["colspan", "rowspan", "align"],
        "b" | "br" | "caption" | "cite" | "code" | "dd" | "del" | "div" | "dl" | "dt" | "em"
        | "figcaption" | "figure" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hr" | "i"
        | "ins" | "kbd" | "li" | "mark" | "ol" | "p" | "pre" | "s" | "small" | "span"
        | "strong" | "sub" | "sup" | "table" | "tbody" | "thead" | "tfoot" | "tr" | "u"
        | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Neutralize executable markup in `input`.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        push_text(&mut out, &rest[..lt]);
        let candidate = &rest[lt..];
        match tag_end(candidate) {
            Some(end) => {
                push_tag(&mut out, &candidate[..=end]);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = &candidate[1..];
            }
        }
    }
    push_text(&mut out, rest);
    out
}

fn push_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Index of the `>` closing the tag that `candidate` starts with, or `None`
/// when the leading `<` does not open a tag.
fn tag_end(candidate: &str) -> Option<usize> {
    let after = candidate.get(1..)?;
    let name_start = after.strip_prefix('/').unwrap_or(after);
    if !name_start.chars().next()?.is_ascii_alphabetic() {
        return None;
    }

    let mut quote: Option<char> = None;
    for (i, c) in candidate.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '<') => return None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn push_tag(out: &mut String, tag: &str) {
    let inner = &tag[1..tag.len() - 1];
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();

    let Some(allowed) = allowed_attributes(&name) else {
        push_text(out, tag);
        return;
    };

    if closing {
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&name);
    for (attr, value) in parse_attributes(&body[name_len..]) {
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        match value {
            Some(value) => {
                if (attr == "href" || attr == "src") && !is_safe_link(value) {
                    continue;
                }
                out.push(' ');
                out.push_str(&attr);
                out.push_str("=\"");
                push_attribute_value(out, value);
                out.push('"');
            }
            None => {
                out.push(' ');
                out.push_str(&attr);
            }
        }
    }
    if body.trim_end().ends_with('/') {
        out.push_str(" /");
    }
    out.push('>');
}

/// Split the attribute section of a tag into lowercase names and raw values.
fn parse_attributes(section: &str) -> Vec<(String, Option<&str>)> {
    let mut attrs = Vec::new();
    let mut rest = section;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }

        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = rest[..name_len].to_ascii_lowercase();
        rest = rest[name_len..].trim_start();

        let Some(after_eq) = rest.strip_prefix('=') else {
            attrs.push((name, None));
            continue;
        };
        let after_eq = after_eq.trim_start();

        let (value, remaining) = match after_eq.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let quoted = &after_eq[1..];
                match quoted.find(q) {
                    Some(close) => (&quoted[..close], &quoted[close + 1..]),
                    None => (quoted, ""),
                }
            }
            _ => {
                let len = after_eq
                    .find(char::is_whitespace)
                    .unwrap_or(after_eq.len());
                (&after_eq[..len], &after_eq[len..])
            }
        };
        attrs.push((name, Some(value)));
        rest = remaining;
    }

    attrs
}

fn push_attribute_value(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Relative links and http(s)/mailto/tel targets only.
fn is_safe_link(value: &str) -> bool {
    let normalized: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = normalized.find(':');
    let path_start = normalized.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (None, _) => true,
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => matches!(&normalized[..colon], "http" | "https" | "mailto" | "tel"),
    }
}

/// Decode numeric character references and `&colon;`, which browsers resolve
/// before interpreting a link scheme.
fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let entity = &rest[amp..];
        match decode_entity(entity) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &entity[consumed..];
            }
            None => {
                out.push('&');
                rest = &entity[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<(char, usize)> {
    if entity
        .get(.."&colon;".len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("&colon;"))
    {
        return Some((':', "&colon;".len()));
    }

    let digits = entity.strip_prefix("&#")?;
    let (radix, digits, prefix_len) = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => (16, hex, 3),
        None => (10, digits, 2),
    };
    let len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }
    let code = u32::from_str_radix(&digits[..len], radix).ok()?;
    let c = char::from_u32(code)?;
    let terminator = usize::from(digits[len..].starts_with(';'));
    Some((c, prefix_len + len + terminator))
}
