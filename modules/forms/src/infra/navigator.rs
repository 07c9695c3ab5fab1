use tokio::sync::watch;
use tracing::{info, warn};

use crate::contract::model::NavigationRequest;
use crate::domain::ports::Navigator;

/// Navigator that switches the current route once the request delay has
/// elapsed. Watchers see each route as it becomes current.
pub struct TimedNavigator {
    route: watch::Sender<Option<String>>,
}

impl TimedNavigator {
    pub fn new() -> Self {
        let (route, _) = watch::channel(None);
        Self { route }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.route.subscribe()
    }

    pub fn current(&self) -> Option<String> {
        self.route.borrow().clone()
    }
}

impl Default for TimedNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for TimedNavigator {
    fn navigate(&self, request: NavigationRequest) {
        let route = self.route.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(request.delay).await;
                    info!(route = %request.route, "navigating");
                    route.send_replace(Some(request.route));
                });
            }
            Err(_) => {
                warn!(route = %request.route, "no runtime, navigating without delay");
                route.send_replace(Some(request.route));
            }
        }
    }
}
