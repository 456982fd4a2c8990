use super::Dispatcher;
use crate::error::DispatchError;
use crate::events::Event;
use crate::request::RequestLike;
use crate::route::{Args, Outcome};

use tracing::debug;

impl<Req, Res> Dispatcher<Req, Res>
where
    Req: RequestLike,
{
    /// Runs `request` through the table.
    ///
    /// The first route whose action responds wins. An action may instead
    /// return a replacement request, which restarts matching from the first
    /// route, or nothing, which moves on to the next route. `Ok(None)` means
    /// the table was exhausted without a response.
    pub fn dispatch(&self, request: Req) -> Result<Option<Res>, DispatchError> {
        let mut request = request;
        let mut forwards: usize = 0;

        self.emit(Event::Received { request: &request });

        'matching: loop {
            for route in self.table.iter() {
                let params = match route.matches(&request)? {
                    Some(params) => params,
                    None => continue,
                };

                let outcome = {
                    let args = Args::new(&request, params);
                    match self.invoker.invoke(route.action(), &args) {
                        Ok(outcome) => {
                            self.emit(Event::Dispatched {
                                request: &request,
                                route,
                                args: &args,
                            });
                            outcome
                        }
                        Err(error) => {
                            self.emit(Event::HandlerFailed {
                                request: &request,
                                route,
                                error: &error,
                            });
                            return Err(DispatchError::Handler(error));
                        }
                    }
                };

                match outcome {
                    Outcome::Respond(response) => return Ok(Some(response)),
                    Outcome::Forward(next) => {
                        if let Some(limit) = self.config.max_forwards {
                            if forwards >= limit {
                                return Err(DispatchError::TooManyForwards { limit });
                            }
                        }
                        forwards += 1;
                        debug!(from = request.uri(), to = next.uri(), "forwarding request");
                        request = next;
                        continue 'matching;
                    }
                    Outcome::Continue => {}
                }
            }

            self.emit(Event::NotFound { request: &request });
            return Ok(None);
        }
    }
}
