/// Grounded-answer prompt. Retrieved information precedes the question.
pub const ANSWER_TEMPLATE: &str = "You are a helpful assistant. Use only the following information to answer the question.\n\
Information:\n\
{information}\n\
\n\
Question: {question}\n\
If the information does not contain the answer, simply say that you don't know. Do not try to make up an answer.";

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never scanned for placeholders. Unknown placeholders and
/// unmatched braces are copied through unchanged.
#[must_use]
pub fn render_template(template: &str, variables: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        if let Some((_, value)) = variables.iter().find(|(key, _)| *key == name) {
            out.push_str(value);
            rest = &after[close + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// Render [`ANSWER_TEMPLATE`] for one question.
#[must_use]
pub fn answer_prompt(information: &str, question: &str) -> String {
    render_template(
        ANSWER_TEMPLATE,
        &[("information", information), ("question", question)],
    )
}
