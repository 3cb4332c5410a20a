use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{error::Outcome, fetcher::MAX_SAVED_TRACKS, utils};

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Vibester - {title}</title></head><body>{body}</body></html>",
        title = title,
        body = body
    )
}

pub fn index() -> Html<String> {
    Html(layout(
        "Welcome",
        "<h2>Vibester</h2>\
         <p>Sort your saved tracks into playlists by genre, by decade or by vibe.</p>\
         <p><a href=\"/authorize\">Connect with Spotify</a></p>",
    ))
}

/// Range inputs of the custom sort form, posted as JSON by [`CUSTOM_SCRIPT`].
const CUSTOM_FORM: &str = r#"<form id="custom">
<h3>Custom</h3>
<p>Energy <input name="energy_min" type="number" min="0" max="100" value="0"> to <input name="energy_max" type="number" min="0" max="100" value="100"></p>
<p>Danceability <input name="danceability_min" type="number" min="0" max="100" value="0"> to <input name="danceability_max" type="number" min="0" max="100" value="100"></p>
<p>Valence <input name="valence_min" type="number" min="0" max="100" value="0"> to <input name="valence_max" type="number" min="0" max="100" value="100"></p>
<p>Playlist name <input name="name" type="text"></p>
<button type="submit">Sort</button>
</form>"#;

const CUSTOM_SCRIPT: &str = r#"<script>
document.getElementById("custom").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const range = (key) => [form.get(key + "_min"), form.get(key + "_max")];
  const response = await fetch("/custom", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      energy: range("energy"),
      danceability: range("danceability"),
      valence: range("valence"),
      name: form.get("name"),
    }),
  });
  if (response.ok) {
    window.location = "/custom";
  }
});
</script>"#;

pub fn home() -> Html<String> {
    let body = format!(
        "<h2>What should we sort by?</h2>\
         <ul>\
         <li><a href=\"/genre\">Genre</a></li>\
         <li><a href=\"/decade\">Decade</a></li>\
         </ul>{form}{script}",
        form = CUSTOM_FORM,
        script = CUSTOM_SCRIPT
    );
    Html(layout("Home", &body))
}

/// Lists the playlists a sort run wrote to.
pub fn playlists(playlist_type: &str, ids: &[String]) -> Response {
    let items: String = ids
        .iter()
        .map(|id| {
            let url = utils::playlist_url(id);
            format!("<li><a href=\"{url}\">{url}</a></li>", url = url)
        })
        .collect();

    let body = if ids.is_empty() {
        format!(
            "<h2>No {kind} playlists were needed.</h2><p>None of your saved tracks fit a {kind}.</p>",
            kind = playlist_type
        )
    } else {
        format!(
            "<h2>Your {kind} playlists are ready.</h2><ul>{items}</ul><p><a href=\"/home\">Back</a></p>",
            kind = playlist_type,
            items = items
        )
    };

    Html(layout("Playlists", &body)).into_response()
}

pub fn outcome(outcome: Outcome) -> Response {
    match outcome {
        Outcome::NoData => Html(layout(
            "No tracks",
            "<h2>You have no saved tracks.</h2><p>Like a few songs and try again.</p>",
        ))
        .into_response(),
        Outcome::TooManyTracks => Html(layout(
            "Too many tracks",
            &format!(
                "<h2>You have too many saved tracks.</h2><p>Vibester can sort up to {} saved tracks.</p>",
                MAX_SAVED_TRACKS
            ),
        ))
        .into_response(),
        Outcome::Failure => failure(),
    }
}

pub fn failure() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Html(layout(
            "Something went wrong",
            "<h2>Spotify did not cooperate.</h2><p><a href=\"/\">Start over</a></p>",
        )),
    )
        .into_response()
}

pub fn message(status: StatusCode, text: &str) -> Response {
    (status, Html(layout("Vibester", &format!("<h4>{}</h4>", text)))).into_response()
}
