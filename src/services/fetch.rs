use dashmap::DashMap;

/// The session context a fetch was started under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchScope {
    pub account_id: String,
    pub auth_token: String,
}

/// Proof of which fetch generation a response belongs to. Check
/// `FetchCoordinator::is_current` before applying the response to state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    screen: String,
    scope: FetchScope,
    generation: u64,
}

/// Guards against out-of-order response application. When the active account
/// is switched mid-fetch, the in-flight request's ticket is superseded and
/// its response must be dropped instead of racing with the newer one.
#[derive(Default)]
pub struct FetchCoordinator {
    current: DashMap<String, (FetchScope, u64)>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self {
            current: DashMap::new(),
        }
    }

    /// Start a fetch for a screen under the given scope. Any earlier ticket
    /// for the same screen is superseded.
    pub fn begin(&self, screen: &str, scope: FetchScope) -> FetchTicket {
        let mut entry = self
            .current
            .entry(screen.to_string())
            .or_insert((scope.clone(), 0));
        entry.1 += 1;
        entry.0 = scope.clone();
        let generation = entry.1;
        drop(entry);

        FetchTicket {
            screen: screen.to_string(),
            scope,
            generation,
        }
    }

    /// True only for the most recent ticket issued for the screen, and only
    /// while the scope it was issued under is still the active one.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        match self.current.get(&ticket.screen) {
            Some(entry) => entry.0 == ticket.scope && entry.1 == ticket.generation,
            None => false,
        }
    }

    /// Supersede everything for a screen without starting a new fetch, e.g.
    /// on logout.
    pub fn invalidate(&self, screen: &str) {
        self.current.remove(screen);
    }
}
