use super::aggregator::{ActivityList, Filters, ListView, PageSize};
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionState;
use chrono::NaiveDate;

/// What the dashboard renders for a given session.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView<'a> {
    LoadingIdentity,
    NotAuthenticated,
    Ready { greeting: String, list: ListView<'a> },
}

/// Filter values and current page of the listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    filters: Filters,
    current_page: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            current_page: 1,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.filters.date = date;
    }

    pub fn set_email_filter(&mut self, email: impl Into<String>) {
        self.filters.email = email.into();
    }

    /// New search term; back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
        self.current_page = 1;
    }

    /// Clear every filter; back to page 1.
    pub fn reset_filters(&mut self) {
        self.filters = Filters::default();
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) -> AppResult<()> {
        if page == 0 {
            return Err(AppError::InvalidPage(page));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn change_page_size(&mut self, list: &mut ActivityList, size: PageSize) {
        list.set_page_size(size, &mut self.current_page);
    }

    pub fn render<'a>(&self, session: &SessionState, list: &'a ActivityList) -> DashboardView<'a> {
        match session {
            SessionState::Loading => DashboardView::LoadingIdentity,
            SessionState::SignedOut => DashboardView::NotAuthenticated,
            SessionState::SignedIn(user) => DashboardView::Ready {
                greeting: user.greeting_name(),
                list: list.view(&self.filters, self.current_page),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Session;

    fn signed_in() -> SessionState {
        SessionState::SignedIn(Session {
            uid: "u1".into(),
            email: "sari.dewi@corp.id".into(),
            display_name: None,
        })
    }

    #[test]
    fn search_and_reset_go_back_to_first_page() {
        let mut dash = Dashboard::new();
        dash.go_to_page(3).unwrap();
        dash.set_search("wfh");
        assert_eq!(dash.current_page(), 1);

        dash.go_to_page(2).unwrap();
        dash.set_date(NaiveDate::from_ymd_opt(2025, 7, 24));
        assert_eq!(dash.current_page(), 2);

        dash.reset_filters();
        assert_eq!(dash.current_page(), 1);
        assert_eq!(dash.filters(), &Filters::default());
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut dash = Dashboard::new();
        let mut list = ActivityList::default();
        dash.go_to_page(4).unwrap();
        dash.change_page_size(&mut list, PageSize::Hundred);
        assert_eq!(dash.current_page(), 1);
        assert_eq!(list.page_size(), PageSize::Hundred);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(Dashboard::new().go_to_page(0).is_err());
    }

    #[test]
    fn render_depends_on_session() {
        let dash = Dashboard::new();
        let list = ActivityList::default();

        assert_eq!(
            dash.render(&SessionState::Loading, &list),
            DashboardView::LoadingIdentity
        );
        assert_eq!(
            dash.render(&SessionState::SignedOut, &list),
            DashboardView::NotAuthenticated
        );
        assert_eq!(
            dash.render(&signed_in(), &list),
            DashboardView::Ready {
                greeting: "sari dewi".into(),
                list: ListView::Loading,
            }
        );
    }
}
