mod form;
mod support;
