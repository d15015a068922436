use pulldown_cmark::{html, Options, Parser};

/// Renders a markdown string to HTML. Pure and stateless; the chat view
/// injects the result into the assistant bubble.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
