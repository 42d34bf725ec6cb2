use crate::common_io::*;
use nalgebra_sparse::{CooMatrix, CscMatrix};
use std::io::Write;

/// Write the triplets into a MatrixMarket file with 1-based indices
/// * `triplets` - the triplets to write
/// * `nrow` - number of rows
/// * `ncol` - number of columns
/// * `mtx_file` - the output file (e.g., "matrix.mtx.gz")
pub fn write_mtx_triplets(
    triplets: &[(u64, u64, f32)],
    nrow: usize,
    ncol: usize,
    mtx_file: &str,
) -> anyhow::Result<()> {
    mkdir(mtx_file)?;

    let mut buf = open_buf_writer(mtx_file)?;

    // write the header
    let nnz = triplets.len();
    writeln!(buf, "%%MatrixMarket matrix coordinate real general")?;
    writeln!(buf, "{}\t{}\t{}", nrow, ncol, nnz)?;

    // write them with 1-based indices
    for (row, col, val) in triplets {
        writeln!(buf, "{}\t{}\t{}", row + 1, col + 1, val)?;
    }

    buf.flush()?;
    Ok(())
}

#[derive(Debug)]
pub struct MtxTriplets {
    pub nrow: usize,
    pub ncol: usize,
    pub triplets: Vec<(usize, usize, f32)>,
}

/// Read a matrix market file and return 0-based (row, col, val)
/// triplets together with the declared shape
/// * `mtx_file` - Path to the matrix market file
pub fn read_mtx_triplets(mtx_file: &str) -> anyhow::Result<MtxTriplets> {
    // `%` lines are skipped, so the size line comes first
    let ReadLinesOut { lines, header } = read_lines_of_types::<f64>(mtx_file, &[' ', '\t'], 0)?;

    if header.len() != 3 {
        return Err(anyhow::anyhow!("Failed to parse mtx header: {}", mtx_file));
    }

    let nrow = header[0].parse::<usize>()?;
    let ncol = header[1].parse::<usize>()?;
    let nnz = header[2].parse::<usize>()?;

    if lines.len() != nnz {
        return Err(anyhow::anyhow!(
            "{}: expected {} non-zero entries, found {}",
            mtx_file,
            nnz,
            lines.len()
        ));
    }

    let mut triplets = Vec::with_capacity(nnz);
    for words in lines {
        if words.len() != 3 {
            return Err(anyhow::anyhow!("{}: expected `row col value`", mtx_file));
        }

        if words[..2].iter().any(|x| x.fract() != 0.0 || *x < 1.0) {
            return Err(anyhow::anyhow!(
                "{}: index ({}, {}) is not a positive integer",
                mtx_file,
                words[0],
                words[1]
            ));
        }

        let (row, col) = (words[0] as usize, words[1] as usize);

        // convert 1-based to 0-based
        if row < 1 || row > nrow || col < 1 || col > ncol {
            return Err(anyhow::anyhow!(
                "{}: index ({}, {}) out of bounds for {} x {}",
                mtx_file,
                row,
                col,
                nrow,
                ncol
            ));
        }
        triplets.push((row - 1, col - 1, words[2] as f32));
    }

    Ok(MtxTriplets {
        nrow,
        ncol,
        triplets,
    })
}

/// Read a matrix market file into a compressed sparse column matrix
/// * `mtx_file` - Path to the matrix market file
/// * `transpose` - flip rows and columns, e.g., to turn a 10x
///   `feature x barcode` file into `barcode x feature`
pub fn read_mtx_csc(mtx_file: &str, transpose: bool) -> anyhow::Result<CscMatrix<f32>> {
    let MtxTriplets {
        nrow,
        ncol,
        triplets,
    } = read_mtx_triplets(mtx_file)?;

    let (nrow, ncol) = if transpose { (ncol, nrow) } else { (nrow, ncol) };

    let (rows, cols, vals) = triplets
        .into_iter()
        .map(|(i, j, x)| if transpose { (j, i, x) } else { (i, j, x) })
        .fold(
            (vec![], vec![], vec![]),
            |(mut rr, mut cc, mut vv), (i, j, x)| {
                rr.push(i);
                cc.push(j);
                vv.push(x);
                (rr, cc, vv)
            },
        );

    let coo = CooMatrix::try_from_triplets(nrow, ncol, rows, cols, vals)
        .map_err(|e| anyhow::anyhow!("{}: {}", mtx_file, e))?;

    Ok(CscMatrix::from(&coo))
}
