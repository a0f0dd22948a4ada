//! Window contents checked against the source stream for random inputs,
//! strides, read sizes and failure points.

use alloc::vec::Vec;

use quickcheck::{QuickCheck, TestResult};

use super::scripted::ScriptedSource;
use crate::{ByteSource, Input, WindowBuffer};

/// Runs one consumption script against a window of capacity `N`, checking
/// after every step that the current byte, the lookahead and the lookbehind
/// all agree with the stream.
fn consume_and_check<const N: usize>(
    data: &[u8],
    strides: &[u8],
    chunks: &[u8],
    fail_at: Option<usize>,
) -> Result<(), &'static str> {
    let mut source = ScriptedSource::new(data)
        .with_chunks(chunks.iter().map(|&c| usize::from(c % 9)));
    if let Some(at) = fail_at {
        source = source.failing_at(at);
    }
    let delivered = fail_at.map_or(data.len(), |at| at.min(data.len()));
    let stream = &data[..delivered];

    let mut window = WindowBuffer::<_, N>::borrowed(&mut source);
    let mut consumed = 0;
    let mut strides = strides.iter().map(|&s| 1 + usize::from(s) % N).chain(core::iter::repeat(1));

    loop {
        let mut stride = strides.next().unwrap_or(1);
        if consumed + stride > stream.len() {
            stride = 1;
        }
        let ahead_before = window.future_count();
        let pulled_before = window.source().position();

        let got = window.advance(stride);

        if consumed == stream.len() {
            if got != Input::End || window.current() != Input::End || !window.at_end() {
                return Err("drained stream must end");
            }
            // End is sticky.
            if window.advance(1) != Input::End {
                return Err("end must repeat");
            }
            break;
        }

        consumed += stride;
        if got != Input::Byte(stream[consumed - 1]) || window.current() != got {
            return Err("advance returned the wrong byte");
        }

        // Without a refill the lookahead shrinks by exactly the stride.
        if window.source().position() == pulled_before
            && window.future_count() + stride != ahead_before
        {
            return Err("lookahead did not shrink by the stride");
        }

        // Lookahead matches the stream.
        for i in 0..window.future_count() {
            if window.future(i) != stream[consumed + i] {
                return Err("future byte differs from stream");
            }
        }
        if window.get_future(window.future_count()).is_some() {
            return Err("future past the window must be None");
        }

        // Lookbehind matches the stream, even after wrapping.
        if window.past_count() >= N || window.past_count() > consumed - 1 {
            return Err("past region larger than possible");
        }
        for i in 0..window.past_count() {
            if window.past(i) != stream[consumed - 2 - i] {
                return Err("past byte differs from stream");
            }
        }

        if window.len() > N || window.len() != window.past_count() + 1 + window.future_count() {
            return Err("region sizes inconsistent");
        }
    }

    if window.failed() != (fail_at.is_some_and(|at| at <= data.len())) {
        return Err("failure flag wrong");
    }
    Ok(())
}

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

fn check<const N: usize>(data: Vec<u8>, strides: Vec<u8>, chunks: Vec<u8>) -> TestResult {
    match consume_and_check::<N>(&data, &strides, &chunks, None) {
        Ok(()) => TestResult::passed(),
        Err(msg) => TestResult::error(msg),
    }
}

#[test]
fn window_tracks_stream_small_capacity() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, strides: Vec<u8>, chunks: Vec<u8>) -> TestResult {
        check::<5>(data, strides, chunks)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>, Vec<u8>) -> TestResult);
}

#[test]
fn window_tracks_stream_wrapping_many_times() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(seed: Vec<u8>, strides: Vec<u8>, chunks: Vec<u8>) -> TestResult {
        // Stretch the input so a 16 byte window wraps repeatedly.
        let data: Vec<u8> = seed.iter().copied().cycle().take(seed.len() * 8).collect();
        check::<16>(data, strides, chunks)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>, Vec<u8>) -> TestResult);
}

#[test]
fn failing_source_yields_prefix_then_end() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, chunks: Vec<u8>, fail_at: usize) -> TestResult {
        let fail_at = fail_at % (data.len() + 2);
        match consume_and_check::<7>(&data, &[], &chunks, Some(fail_at)) {
            Ok(()) => TestResult::passed(),
            Err(msg) => TestResult::error(msg),
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>, usize) -> TestResult);
}

#[test]
fn single_steps_return_every_byte_in_order() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>) -> bool {
        let mut window = WindowBuffer::<_, 8>::owned(ScriptedSource::new(&data));
        let got: Vec<u8> = window.by_ref().collect();
        got == data && window.source().is_exhausted()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
