use crate::context::HostContext;
use crate::error::HostError;

/// Page storage key of the edited symbol.
pub const EDIT_SYMBOL: u32 = 2001;
/// Page storage key of the edited date.
pub const EDIT_DATE: u32 = 2002;

/// The page's user-editable inputs, persisted by the host.
#[derive(Debug, Clone)]
pub struct Edit {
    ctx: HostContext,
}

impl Edit {
    pub fn new(ctx: HostContext) -> Self {
        Self { ctx }
    }

    pub fn symbol(&self) -> Result<Option<String>, HostError> {
        self.ctx.host().page_read(self.ctx.page(), EDIT_SYMBOL)
    }

    pub fn set_symbol(&self, symbol: &str) -> Result<(), HostError> {
        self.ctx.host().page_save(self.ctx.page(), EDIT_SYMBOL, symbol)
    }

    pub fn date(&self) -> Result<Option<String>, HostError> {
        self.ctx.host().page_read(self.ctx.page(), EDIT_DATE)
    }

    pub fn set_date(&self, date: &str) -> Result<(), HostError> {
        self.ctx.host().page_save(self.ctx.page(), EDIT_DATE, date)
    }
}
