pub fn linear_len(directed: bool, node_count: usize) -> usize {
    if directed {
        node_count * node_count
    } else {
        node_count * (node_count + 1) / 2
    }
}

pub fn index(directed: bool, row: usize, col: usize, node_count: usize) -> usize {
    if directed {
        row * node_count + col
    } else {
        // Make sure that the coordinates are in the lower triangle.
        let (row, col) = if row >= col { (row, col) } else { (col, row) };
        // The rows are 1 + 2 + 3 + ... + n = n (n + 1) / 2.
        row * (row + 1) / 2 + col
    }
}

pub fn coords(directed: bool, index: usize, node_count: usize) -> (usize, usize) {
    if directed {
        let col = index % node_count;
        let row = index / node_count;
        (row, col)
    } else {
        // index = row * (row + 1) / 2 + col => 2 * (index - col) = row^2 + row
        //
        // Quadratic equation for row. We don't know col so we use just
        // index => discriminant is generally not an integer, we need to
        // round down. The difference between index and start of the row is
        // the column.
        let d = (1. + 8. * index as f64).sqrt().floor() as usize;
        let mut row = (d - 1) / 2;

        // Guard against floating point error for large indices.
        while row * (row + 1) / 2 > index {
            row -= 1;
        }
        while (row + 1) * (row + 2) / 2 <= index {
            row += 1;
        }

        let col = index - row * (row + 1) / 2;
        (row, col)
    }
}
