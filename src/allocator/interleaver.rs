/// Flatten lists column by column: `lists[0][0], lists[1][0], ..., lists[0][1], ...`
///
/// With equal-length input, position `c * lists.len() + j` holds `lists[j][c]`.
/// Shorter lists are skipped at columns they do not reach.
pub fn interleave_columns<T: Clone>(lists: &[Vec<T>]) -> Vec<T> {
    let columns = lists.iter().map(Vec::len).max().unwrap_or(0);
    let mut flat = Vec::with_capacity(lists.iter().map(Vec::len).sum());

    for column in 0..columns {
        for list in lists {
            if let Some(item) = list.get(column) {
                flat.push(item.clone());
            }
        }
    }

    flat
}
