//! Console rendering of a response.
//!
//! Layout, one block per response:
//!
//! ```text
//! Code: 200
//! Headers
//!     content-type: "application/json"
//! Body: {"queryid":"2017-..."}
//! ```
//!
//! Header lines are indented with a tab. Multiple values for one header are
//! joined with `", "` and the result is printed quoted. The body is written
//! as raw bytes.

use std::io::{self, Write};

use crate::http::HttpResponse;

pub fn write_response<W: Write>(out: &mut W, response: &HttpResponse) -> io::Result<()> {
    writeln!(out, "Code: {}", response.status)?;
    writeln!(out, "Headers")?;
    for (name, values) in &response.headers {
        writeln!(out, "\t{name}: {:?}", values.join(", "))?;
    }
    out.write_all(b"Body: ")?;
    out.write_all(&response.body)?;
    out.write_all(b"\n")?;
    out.flush()
}
