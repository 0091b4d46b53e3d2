//! Word-stream operations over any buffered reader.
//!
//! Words are maximal runs of non-whitespace bytes. Lines are read into one
//! reusable buffer; [`StringSet`] keeps its own copy of every word it stores.

use std::io::BufRead;

use anyhow::{Context, Result};
use slotset::StringSet;

/// Calls `visit` once per word of `reader`, in order.
pub fn for_each_word<R, F>(mut reader: R, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> Result<()>,
{
    let mut line = String::new();
    let mut number = 0_usize;
    loop {
        line.clear();
        number += 1;
        let read = reader
            .read_line(&mut line)
            .with_context(|| format!("failed to read line {number}"))?;
        if read == 0 {
            return Ok(());
        }
        line.split_ascii_whitespace().try_for_each(&mut visit)?;
    }
}

/// Counts every word of `reader`, duplicates included.
pub fn count_words<R: BufRead>(reader: R) -> Result<usize> {
    let mut total = 0;
    for_each_word(reader, |_| {
        total += 1;
        Ok(())
    })?;
    Ok(total)
}

/// Adds every word of `reader` to `set`. Returns how many were new.
pub fn insert_words<R: BufRead>(reader: R, set: &mut StringSet) -> Result<usize> {
    let mut added = 0;
    for_each_word(reader, |word| {
        if set
            .add(word)
            .with_context(|| format!("cannot store `{word}`"))?
        {
            added += 1;
        }
        Ok(())
    })?;
    Ok(added)
}

/// Removes every word of `reader` from `set`. Returns how many were removed.
pub fn remove_words<R: BufRead>(reader: R, set: &mut StringSet) -> Result<usize> {
    let mut removed = 0;
    for_each_word(reader, |word| {
        if set.remove(word) {
            removed += 1;
        }
        Ok(())
    })?;
    Ok(removed)
}

/// Toggles the membership of each word of `reader` in `set`.
///
/// Afterwards `set` holds exactly the words seen an odd number of times.
pub fn toggle_words<R: BufRead>(reader: R, set: &mut StringSet) -> Result<()> {
    for_each_word(reader, |word| {
        if !set.remove(word) {
            set.add(word)
                .with_context(|| format!("cannot store `{word}`"))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use slotset::Strategy;
    use std::io::Cursor;

    fn reader(text: &str) -> Cursor<&[u8]> {
        Cursor::new(text.as_bytes())
    }

    #[rstest]
    #[case("", 0)]
    #[case("one", 1)]
    #[case("  the cat\tsat\n\non the\r\nmat  ", 6)]
    fn test_count_words(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(count_words(reader(text)).unwrap(), expected);
    }

    #[rstest]
    #[case(Strategy::Unsorted)]
    #[case(Strategy::Sorted)]
    #[case(Strategy::OpenAddressing)]
    #[case(Strategy::Chained)]
    fn test_insert_and_remove_words(#[case] strategy: Strategy) {
        let mut set = StringSet::new(strategy, 32).unwrap();
        let added = insert_words(reader("a b a c\nb d"), &mut set).unwrap();
        assert_eq!(added, 4);
        assert_eq!(set.count(), 4);

        let removed = remove_words(reader("b x d b"), &mut set).unwrap();
        assert_eq!(removed, 2);

        let mut remaining = set.snapshot();
        remaining.sort_unstable();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[rstest]
    fn test_toggle_keeps_odd_occurrences() {
        let mut set = StringSet::new(Strategy::Sorted, 8).unwrap();
        toggle_words(reader("x y x z x y"), &mut set).unwrap();
        assert_eq!(set.snapshot(), vec!["x", "z"]);
    }

    #[rstest]
    fn test_insert_reports_full_set() {
        let mut set = StringSet::new(Strategy::Chained, 2).unwrap();
        let error = insert_words(reader("a b c"), &mut set).unwrap_err();
        assert!(error.to_string().contains("`c`"));
        assert_eq!(set.count(), 2);
    }

    #[rstest]
    fn test_invalid_utf8_is_reported_with_line() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let error = count_words(Cursor::new(bytes)).unwrap_err();
        assert!(error.to_string().contains("line 2"));
    }
}
