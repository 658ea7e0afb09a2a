use std::fmt;
use std::time::Duration;

/// What a single run wrote and what it cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteStats {
    pub rows_written: u64,
    /// Bytes handed to the sink, header included.
    pub bytes_written: u64,
    pub elapsed: Duration,
    pub cpu: Duration,
}

impl WriteStats {
    pub fn rows_per_second(&self) -> f64 {
        per_second(self.rows_written, self.elapsed)
    }

    pub fn bytes_per_second(&self) -> f64 {
        per_second(self.bytes_written, self.elapsed)
    }
}

fn per_second(v: u64, d: Duration) -> f64 {
    let secs = d.as_secs_f64();
    if secs > 0.0 {
        v as f64 / secs
    } else {
        0.0
    }
}

impl fmt::Display for WriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows: {}  size: {}  rate: {}/s  time(sec): {:.3}  cpu(sec): {:.3}",
            self.rows_written,
            human_bytes(self.bytes_written as f64),
            human_bytes(self.bytes_per_second()),
            self.elapsed.as_secs_f64(),
            self.cpu.as_secs_f64(),
        )
    }
}

/// Scale a byte count down to the largest unit that keeps it at or above 1,
/// keeping 3 decimals only when the value is not whole.
pub fn human_bytes(v: f64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    let mut scaled = v;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    if scaled.fract() == 0.0 {
        format!("{} {}", scaled as u64, UNITS[unit])
    } else {
        format!("{:.3} {}", scaled, UNITS[unit])
    }
}

#[test]
fn test_human_bytes() {
    for t in &[
        (0.0, "0 B"),
        (5.0, "5 B"),
        (1023.0, "1023 B"),
        (1024.0, "1 KB"),
        (2524.0, "2.465 KB"),
        (1024.0 * 999.0, "999 KB"),
        (3.0 * 1024.0 * 1024.0, "3 MB"),
        ((11u64 << 40) as f64, "11 TB"),
    ] {
        assert_eq!(human_bytes(t.0), t.1, "human_bytes of {}", t.0);
    }
}

#[test]
fn test_rates() {
    let st = WriteStats {
        rows_written: 500,
        bytes_written: 2048,
        elapsed: Duration::from_millis(500),
        cpu: Duration::from_millis(100),
    };
    assert_eq!(st.rows_per_second(), 1000.0);
    assert_eq!(st.bytes_per_second(), 4096.0);

    let idle = WriteStats::default();
    assert_eq!(idle.rows_per_second(), 0.0);

    let line = format!("{}", st);
    assert!(line.starts_with("rows: 500  size: 2 KB  rate: 4 KB/s"), "got: {}", line);
}
