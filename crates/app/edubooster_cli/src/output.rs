//! Text or JSON rendering of command results.

use serde::Serialize;

use crate::Result;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as JSON, or as the lines `text` renders.
    pub fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> Vec<String>,
    {
        for line in self.render(value, text)? {
            println!("{line}");
        }
        Ok(())
    }

    /// Confirmation line for a mutation.
    pub fn done(&self, message: &str) -> Result<()> {
        self.emit(&serde_json::json!({"ok": true, "message": message}), |_| {
            vec![message.to_string()]
        })
    }

    fn render<T, F>(&self, value: &T, text: F) -> Result<Vec<String>>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> Vec<String>,
    {
        if self.json {
            Ok(vec![serde_json::to_string_pretty(value)?])
        } else {
            Ok(text(value))
        }
    }
}
