//! Server-rendered HTML pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::types::{Note, User};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&User>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<span class="navbar-text me-3">Signed in as {}</span><a class="btn btn-outline-light btn-sm" href="/logout">Log out</a>"#,
            escape(&user.name)
        ),
        None => r#"<a class="btn btn-outline-light btn-sm" href="/login">Log in</a>"#.to_string(),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS}">
</head>
<body>
<nav class="navbar navbar-dark bg-dark mb-4">
<div class="container">
<a class="navbar-brand" href="/">Jotter</a>
<div>{nav}</div>
</div>
</nav>
<main class="container">
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn flash_list(flashes: &[String]) -> String {
    flashes
        .iter()
        .map(|msg| {
            format!(
                r#"<div class="alert alert-warning" role="alert">{}</div>"#,
                escape(msg)
            )
        })
        .collect()
}

fn note_item(note: &Note) -> String {
    format!(
        r#"<li class="list-group-item d-flex justify-content-between align-items-start">
<div><div class="text-muted small">{date}</div>{text}</div>
<a class="btn btn-sm btn-outline-danger" href="/delete/{id}">Delete</a>
</li>
"#,
        date = escape(&note.display_date()),
        text = escape(&note.text),
        id = note.id,
    )
}

pub fn home_page(
    user: Option<&User>,
    notes: &[Note],
    image_url: Option<&str>,
    flashes: &[String],
) -> Html<String> {
    let mut body = flash_list(flashes);

    if let Some(url) = image_url {
        body.push_str(&format!(
            r#"<img class="img-fluid rounded mb-4" src="{}" alt="">"#,
            escape(url)
        ));
    }

    match user {
        Some(user) => {
            body.push_str(&format!("<h1>Notes for {}</h1>\n", escape(&user.name)));
            body.push_str(
                r#"<form method="post" action="/" class="mb-4">
<textarea class="form-control mb-2" name="note" rows="3" placeholder="Write a note" required></textarea>
<button class="btn btn-primary" type="submit">Save note</button>
</form>
"#,
            );
            if notes.is_empty() {
                body.push_str(r#"<p class="text-muted">No notes yet.</p>"#);
            } else {
                body.push_str(r#"<ul class="list-group">"#);
                for note in notes {
                    body.push_str(&note_item(note));
                }
                body.push_str("</ul>");
            }
        }
        None => {
            body.push_str(
                r#"<h1>Welcome</h1>
<p><a href="/login">Log in</a> to read and write notes.</p>"#,
            );
        }
    }

    Html(layout("Jotter", user, &body))
}

pub fn login_page(flashes: &[String]) -> Html<String> {
    let mut body = flash_list(flashes);
    body.push_str(
        r#"<h1>Log in</h1>
<form method="post" action="/login" class="col-md-4">
<div class="mb-3">
<label class="form-label" for="name">Your Name:</label>
<input class="form-control" id="name" name="name" type="text" required>
</div>
<div class="mb-3">
<label class="form-label" for="password">Enter your password:</label>
<input class="form-control" id="password" name="password" type="password" required>
</div>
<button class="btn btn-primary" type="submit">Login</button>
</form>
"#,
    );

    Html(layout("Log in", None, &body))
}

pub fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h1>{}</h1>
<p>{}</p>
<p><a href="/">Back to notes</a> &middot; <a href="/login">Log in</a></p>"#,
        escape(title),
        escape(message)
    );
    (status, Html(layout(title, None, &body))).into_response()
}
