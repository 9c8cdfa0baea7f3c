use maud::{html, DOCTYPE};
use poem::web::{Data, Html};
use poem::{handler, IntoResponse};

use crate::prelude::*;
use crate::web::partials::headers;
use crate::web::State;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(state: Data<&State>) -> Result<impl IntoResponse> {
    let identities = &state.identities;
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "MOE Dashboard" }
            }
            body {
                section.section {
                    div.container {
                        p {
                            a.button.is-link href="/moe" {
                                span.icon { i.fas.fa-chart-line {} }
                                span { (identities.player.name) " " (identities.tank.short_name) " Tracker" }
                            }
                        }
                    }
                }
            }
        }
    };
    Ok(Html(markup.into_string()))
}
