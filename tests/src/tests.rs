#![cfg(test)]

mod helpers;

mod accumulate;
mod bus;
mod interrupt;
mod scenarios;
mod script;
