use crate::api::tomato::TomatoApi;
use crate::models::Identities;
use crate::prelude::*;

/// Web application global state, built once before the server starts and never mutated.
#[derive(Clone)]
pub struct State {
    pub tomato: TomatoApi,
    pub identities: Arc<Identities>,
    pub page_size: u32,
}

impl State {
    pub fn new(tomato: TomatoApi, identities: Identities, page_size: u32) -> Self {
        Self {
            tomato,
            identities: Arc::new(identities),
            page_size,
        }
    }
}
