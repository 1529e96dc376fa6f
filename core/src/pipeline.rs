//! Transaction middleware chain
//!
//! Stages run in registration order. Each stage receives the rest of the chain
//! as a continuation that it consumes by calling it, so a stage can run the
//! remainder at most once and can never re-enter the chain.

use crate::context::Context;
use crate::error::Result;
use crate::transaction::Tx;

/// Stage that runs before message execution
pub trait AnteDecorator: Send + Sync {
    fn ante_handle(
        &self,
        ctx: &mut Context,
        tx: &dyn Tx,
        simulate: bool,
        next: AnteNext<'_>,
    ) -> Result<()>;
}

/// Stage that runs after message execution
pub trait PostDecorator: Send + Sync {
    fn post_handle(
        &self,
        ctx: &mut Context,
        tx: &dyn Tx,
        simulate: bool,
        success: bool,
        next: PostNext<'_>,
    ) -> Result<()>;
}

/// Remainder of an ante chain
pub struct AnteNext<'a> {
    rest: &'a [Box<dyn AnteDecorator>],
}

impl AnteNext<'_> {
    pub fn call(self, ctx: &mut Context, tx: &dyn Tx, simulate: bool) -> Result<()> {
        match self.rest.split_first() {
            Some((stage, rest)) => stage.ante_handle(ctx, tx, simulate, AnteNext { rest }),
            None => Ok(()),
        }
    }
}

/// Remainder of a post chain
pub struct PostNext<'a> {
    rest: &'a [Box<dyn PostDecorator>],
}

impl PostNext<'_> {
    pub fn call(self, ctx: &mut Context, tx: &dyn Tx, simulate: bool, success: bool) -> Result<()> {
        match self.rest.split_first() {
            Some((stage, rest)) => stage.post_handle(ctx, tx, simulate, success, PostNext { rest }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct AnteChain {
    stages: Vec<Box<dyn AnteDecorator>>,
}

impl AnteChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: impl AnteDecorator + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, ctx: &mut Context, tx: &dyn Tx, simulate: bool) -> Result<()> {
        AnteNext { rest: &self.stages }.call(ctx, tx, simulate)
    }
}

#[derive(Default)]
pub struct PostChain {
    stages: Vec<Box<dyn PostDecorator>>,
}

impl PostChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stage: impl PostDecorator + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, ctx: &mut Context, tx: &dyn Tx, simulate: bool, success: bool) -> Result<()> {
        PostNext { rest: &self.stages }.call(ctx, tx, simulate, success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxError;
    use crate::events::Event;

    struct NoFeeTx;
    impl Tx for NoFeeTx {}

    /// Records its name as an event, then continues
    struct Record(&'static str);

    impl AnteDecorator for Record {
        fn ante_handle(
            &self,
            ctx: &mut Context,
            tx: &dyn Tx,
            simulate: bool,
            next: AnteNext<'_>,
        ) -> Result<()> {
            ctx.emit(Event::new(self.0));
            next.call(ctx, tx, simulate)
        }
    }

    impl PostDecorator for Record {
        fn post_handle(
            &self,
            ctx: &mut Context,
            tx: &dyn Tx,
            simulate: bool,
            success: bool,
            next: PostNext<'_>,
        ) -> Result<()> {
            ctx.emit(Event::new(self.0).with_attribute("success", success));
            next.call(ctx, tx, simulate, success)
        }
    }

    struct Reject;

    impl AnteDecorator for Reject {
        fn ante_handle(
            &self,
            _ctx: &mut Context,
            _tx: &dyn Tx,
            _simulate: bool,
            _next: AnteNext<'_>,
        ) -> Result<()> {
            Err(TxError::InvalidRequest("rejected".to_string()))
        }
    }

    fn kinds(ctx: &Context) -> Vec<String> {
        ctx.events().events().iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_ante_chain_runs_in_order() {
        let chain = AnteChain::new().with(Record("a")).with(Record("b")).with(Record("c"));
        let mut ctx = Context::new(1);

        chain.run(&mut ctx, &NoFeeTx, false).unwrap();
        assert_eq!(kinds(&ctx), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_error_stops_the_chain() {
        let chain = AnteChain::new().with(Record("a")).with(Reject).with(Record("c"));
        let mut ctx = Context::new(1);

        assert!(chain.run(&mut ctx, &NoFeeTx, false).is_err());
        assert_eq!(kinds(&ctx), vec!["a"]);
    }

    #[test]
    fn test_post_chain_passes_success_flag() {
        let chain = PostChain::new().with(Record("p1")).with(Record("p2"));
        let mut ctx = Context::new(1);

        chain.run(&mut ctx, &NoFeeTx, false, false).unwrap();
        let events = ctx.events().events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.attribute("success") == Some("false")));
    }

    #[test]
    fn test_empty_chain_is_noop() {
        let mut ctx = Context::new(1);
        assert!(AnteChain::new().run(&mut ctx, &NoFeeTx, true).is_ok());
        assert!(PostChain::new().run(&mut ctx, &NoFeeTx, true, true).is_ok());
    }
}
