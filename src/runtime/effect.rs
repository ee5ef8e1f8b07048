use crate::app::submission::Receipt;
use crate::wizard::ExternalFlow;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "data", rename_all = "snake_case")]
pub enum Effect {
    RequestRender,
    Redirect(ExternalFlow),
    Submitted(Receipt),
    Exit,
}
