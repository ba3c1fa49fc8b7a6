//! HTML rendering for the home and result pages.
//!
//! Pages carry no script; navigation uses plain forms so the
//! `script-src 'none'` policy holds.

use domain::navigator::Page;
use domain::{InputMessage, MAX_MESSAGE_LEN};
use http_common::html_escape;

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #f4f6f8;
            color: #1f2933;
            display: flex;
            justify-content: center;
            padding: 48px 16px;
            margin: 0;
        }
        .card {
            background: #fff;
            border-radius: 8px;
            box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08);
            padding: 32px;
            width: 100%;
            max-width: 480px;
        }
        h1 { margin-top: 0; font-size: 1.5rem; }
        label { display: block; margin-bottom: 8px; font-weight: 600; }
        input[type="text"] {
            width: 100%;
            padding: 10px 12px;
            border: 1px solid #cbd2d9;
            border-radius: 4px;
            font-size: 1rem;
        }
        button {
            margin-top: 16px;
            padding: 10px 20px;
            border: none;
            border-radius: 4px;
            background: #2563eb;
            color: #fff;
            font-size: 1rem;
            cursor: pointer;
        }
        .error { color: #b91c1c; margin-top: 12px; min-height: 1.25em; }
        .message { font-size: 1.125rem; word-wrap: break-word; }
"#;

/// Render the home page. `error` fills the error region; the input is
/// always rendered empty.
pub fn render_home(error: Option<&str>) -> String {
    let error_text = error.map(html_escape).unwrap_or_default();
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Secure Form</title>
    <style>{style}</style>
</head>
<body>
    <main class="card">
        <h1>Secure Form</h1>
        <form id="secureForm" method="post" action="/submit" autocomplete="off">
            <label for="userInput">Your message</label>
            <input type="text" id="userInput" name="message" maxlength="{max_len}" placeholder="Type your message here..." value="" autofocus>
            <button type="submit">Submit</button>
        </form>
        <div id="errorMessage" class="error" role="alert">{error}</div>
    </main>
</body>
</html>"##,
        style = STYLE,
        max_len = MAX_MESSAGE_LEN,
        error = error_text,
    )
}

/// Render the result page showing an accepted message.
pub fn render_result(message: &InputMessage) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Secure Form | Result</title>
    <style>{style}</style>
</head>
<body>
    <main class="card">
        <h1>Your message</h1>
        <p id="userMessage" class="message">{message}</p>
        <form method="get" action="{home}">
            <button type="submit">Return to Home Page</button>
        </form>
    </main>
</body>
</html>"##,
        style = STYLE,
        message = html_escape(message.as_str()),
        home = Page::Home.path(),
    )
}
