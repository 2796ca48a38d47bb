//! Default editors for cells without a specialized one.
//!
//! These are the toolkit-default editors the delegate falls back to when a
//! cell's edit data is a plain scalar: spin editors for numbers, a line
//! editor for text. They carry value state only; chrome and key handling
//! belong to the hosting toolkit.

use parking_lot::Mutex;
use taskview_core::Signal;

/// An integer spin editor.
pub struct SpinEditor {
    value: Mutex<i64>,

    /// Emitted when the value changes.
    pub value_changed: Signal<i64>,
}

impl SpinEditor {
    /// Creates a spin editor seeded with `value`.
    pub fn new(value: i64) -> Self {
        Self {
            value: Mutex::new(value),
            value_changed: Signal::new(),
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> i64 {
        *self.value.lock()
    }

    /// Sets the current value.
    pub fn set_value(&self, value: i64) {
        let changed = {
            let mut current = self.value.lock();
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        };
        if changed {
            self.value_changed.emit(value);
        }
    }
}

/// A floating-point spin editor with configurable precision.
pub struct DoubleSpinEditor {
    value: Mutex<f64>,
    decimals: Mutex<u32>,

    /// Emitted when the value changes.
    pub value_changed: Signal<f64>,
}

impl DoubleSpinEditor {
    /// Creates a spin editor seeded with `value` and 2 decimals.
    pub fn new(value: f64) -> Self {
        Self {
            value: Mutex::new(value),
            decimals: Mutex::new(2),
            value_changed: Signal::new(),
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> f64 {
        *self.value.lock()
    }

    /// Sets the current value.
    pub fn set_value(&self, value: f64) {
        let changed = {
            let mut current = self.value.lock();
            if (*current - value).abs() < f64::EPSILON {
                false
            } else {
                *current = value;
                true
            }
        };
        if changed {
            self.value_changed.emit(value);
        }
    }

    /// Returns the number of decimal digits shown.
    pub fn decimals(&self) -> u32 {
        *self.decimals.lock()
    }

    /// Sets the number of decimal digits shown.
    pub fn set_decimals(&self, decimals: u32) {
        *self.decimals.lock() = decimals;
    }
}

/// A single-line text editor.
pub struct LineEditor {
    text: Mutex<String>,

    /// Emitted when the text changes.
    pub text_changed: Signal<String>,
}

impl LineEditor {
    /// Creates a line editor seeded with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
            text_changed: Signal::new(),
        }
    }

    /// Returns the current text.
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    /// Sets the current text.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let changed = {
            let mut current = self.text.lock();
            if *current == text {
                false
            } else {
                *current = text.clone();
                true
            }
        };
        if changed {
            self.text_changed.emit(text);
        }
    }
}
