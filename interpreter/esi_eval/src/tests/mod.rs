//! End-to-end evaluation scenarios, driven through the public
//! `Interpreter` surface with a buffered print handler.

mod support;

mod control_flow;
