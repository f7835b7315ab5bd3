use std::fmt::Display;
use std::panic::Location;
use std::sync::Arc;

use crate::format::{sprint, sprintf};
use crate::record::Tag;

/// Call site reported in a record's `caller` field.
pub type Caller = &'static Location<'static>;

/// The logging surface the rest of a service depends on.
///
/// Call sites use `printf`, `print`, `info` and `error`, through a concrete
/// type, a generic `L: Logger`, an `Arc<L>` or a `&dyn Logger`. Backends
/// implement only [`info_at`](Logger::info_at) and
/// [`error_at`](Logger::error_at), which receive the call site explicitly.
/// The provided methods are `#[track_caller]`, so the call site is captured
/// on every dispatch path, including `&dyn Logger` and `Arc<dyn Logger>`.
///
/// None of the methods report failure. A backend that cannot write drops the
/// record.
pub trait Logger: Send + Sync {
    fn info_at(&self, message: &str, tags: &[Tag], caller: Caller);

    /// Log `message` with `tags` plus the error description under
    /// [`ERROR_KEY`](crate::record::ERROR_KEY).
    fn error_at(
        &self,
        message: &str,
        err: &dyn std::error::Error,
        tags: &[Tag],
        caller: Caller,
    );

    /// Log `format` at info. With no `args` the format is logged verbatim,
    /// otherwise directives are substituted as described in [`crate::format`].
    #[track_caller]
    fn printf(&self, format: &str, args: &[&dyn Display]) {
        printf_at(self, format, args, Location::caller());
    }

    /// Log the space-separated `Display` forms of `args` at info.
    #[track_caller]
    fn print(&self, args: &[&dyn Display]) {
        self.info_at(&sprint(args), &[], Location::caller());
    }

    #[track_caller]
    fn info(&self, message: &str, tags: &[Tag]) {
        self.info_at(message, tags, Location::caller());
    }

    #[track_caller]
    fn error(&self, message: &str, err: &dyn std::error::Error, tags: &[Tag]) {
        self.error_at(message, err, tags, Location::caller());
    }
}

fn printf_at<L: Logger + ?Sized>(log: &L, format: &str, args: &[&dyn Display], caller: Caller) {
    if args.is_empty() {
        log.info_at(format, &[], caller);
    } else {
        log.info_at(&sprintf(format, args), &[], caller);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn info_at(&self, message: &str, tags: &[Tag], caller: Caller) {
        (**self).info_at(message, tags, caller)
    }

    fn error_at(
        &self,
        message: &str,
        err: &dyn std::error::Error,
        tags: &[Tag],
        caller: Caller,
    ) {
        (**self).error_at(message, err, tags, caller)
    }
}
