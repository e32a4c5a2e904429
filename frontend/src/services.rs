use std::rc::Rc;

use crate::config;
use crate::consent::{AnalyticsLoader, ConsentStore};
use crate::platform::{BrowserHttp, BrowserNavigator, BrowserScripts, BrowserStorage};

/// Page-wide capabilities, created once by `App` and handed down as props.
#[derive(Clone)]
pub struct Services {
    pub consent: Rc<ConsentStore<BrowserStorage>>,
    pub analytics: Rc<AnalyticsLoader<BrowserScripts>>,
    pub session: Rc<BrowserStorage>,
    pub http: Rc<BrowserHttp>,
    pub navigator: Rc<BrowserNavigator>,
    pub newsletter_endpoint: &'static str,
}

impl Services {
    pub fn browser() -> Self {
        Self {
            consent: Rc::new(ConsentStore::new(BrowserStorage::local())),
            analytics: Rc::new(AnalyticsLoader::new(
                BrowserScripts,
                config::get_analytics_measurement_id(),
            )),
            session: Rc::new(BrowserStorage::session()),
            http: Rc::new(BrowserHttp),
            navigator: Rc::new(BrowserNavigator),
            newsletter_endpoint: config::get_newsletter_endpoint(),
        }
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.consent, &other.consent) && Rc::ptr_eq(&self.analytics, &other.analytics)
    }
}
