use axum::response::Html;

/// Landing page shown when a request carries no search term.
pub fn render_input_form(public_base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
<h1>Cognitive Search Simple UI Demo</h1>
<h3>Demo use only</h3>
<br>
<p>Use + for AND operation. For example, ocean + pool stipulates that a document must contain both terms.</p>
<p>Use | for OR operation. For example, ocean | pool finds documents containing either ocean or pool or both. Omitting the | symbol has the same result.</p>
<p>Use quotes to search for a phrase. For example "ocean pool" (with the quotation marks) finds documents containing the phrase 'ocean pool'.</p>
<form action="{}/api/cogsearch" method="POST">
    Search term<br>
    <input type="text" name="term">
    <br><br>
    <button type="submit">Submit</button>
</form>
</body>
</html>"#,
        public_base_url
    )
}

pub fn input_form(public_base_url: &str) -> Html<String> {
    Html(render_input_form(public_base_url))
}
