/// One line of an MLF alignment block: `start end phone [word]`, times in
/// integer toolkit ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentRecord {
    pub start: u64,
    pub end: u64,
    pub phone: String,
    pub word: Option<String>,
}

impl AlignmentRecord {
    pub fn new(start: u64, end: u64, phone: impl Into<String>, word: Option<&str>) -> Self {
        Self {
            start,
            end,
            phone: phone.into(),
            word: word.map(str::to_string),
        }
    }

    /// Parses a whitespace-separated record of 3 or 4 fields. The error is
    /// a human-readable reason.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (start, end, phone, word) = match fields.as_slice() {
            [start, end, phone] => (start, end, phone, None),
            [start, end, phone, word] => (start, end, phone, Some(*word)),
            _ => {
                return Err(format!(
                    "expected 3 or 4 fields, found {} in `{line}`",
                    fields.len()
                ))
            }
        };
        Ok(Self::new(parse_ticks(start)?, parse_ticks(end)?, *phone, word))
    }
}

fn parse_ticks(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("invalid tick count `{raw}`"))
}
