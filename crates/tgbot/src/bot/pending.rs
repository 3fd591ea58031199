//! Prepared request bound to a [`Requester`]
use crate::api::types::BotRequest;
use crate::bot::Requester;
use crate::error::Result;
use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt::Debug;
use std::future::IntoFuture;

/// A request with its ids already filled in, waiting to be sent
///
/// Optional parameters can still be changed with [`Self::map_request`]
/// before the call is awaited:
///
/// ```no_run
/// # use tgbot::prelude::*;
/// # async fn run(bot: &Bot, query: &CallbackQuery) -> Result<()> {
/// query
///     .edit_message_text(bot, "Done")?
///     .map_request(|rq| rq.with_parse_mode(ParseMode::HTML))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[must_use = "requests do nothing unless awaited"]
pub struct PendingCall<'a, R, Rq> {
    requester: &'a R,
    request: Rq,
}

impl<'a, R, Rq> PendingCall<'a, R, Rq>
where
    R: Requester,
    Rq: BotRequest + Serialize + Debug + Send + 'static,
{
    pub fn new(requester: &'a R, request: Rq) -> Self {
        Self { requester, request }
    }

    /// Request that will be sent
    pub fn request(&self) -> &Rq {
        &self.request
    }

    pub fn into_request(self) -> Rq {
        self.request
    }

    /// Replace the request, typically to set optional parameters
    pub fn map_request(self, f: impl FnOnce(Rq) -> Rq) -> Self {
        Self {
            requester: self.requester,
            request: f(self.request),
        }
    }

    /// Send the request
    pub async fn send(self) -> Result<Rq::ResponseType> {
        self.requester.send_request(self.request).await
    }
}

impl<'a, R, Rq> IntoFuture for PendingCall<'a, R, Rq>
where
    R: Requester,
    Rq: BotRequest + Serialize + Debug + Send + 'static,
{
    type Output = Result<Rq::ResponseType>;
    type IntoFuture = BoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

impl<R, Rq: Debug> Debug for PendingCall<'_, R, Rq> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
