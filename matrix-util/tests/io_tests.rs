use matrix_util::common_io::{create_temp_dir_file, read_first_words, write_lines};
use matrix_util::mtx_io::{read_mtx_csc, read_mtx_triplets, write_mtx_triplets};
use matrix_util::traits::IoOps;

#[test]
fn dmatrix_io_test() -> anyhow::Result<()> {
    let xx = nalgebra::DMatrix::<f32>::from_row_slice(3, 2, &[1.0, 2.5, 0.0, 4.0, 7.0, 0.25]);

    let tsv_file = create_temp_dir_file("tsv.gz")?;
    xx.to_tsv(tsv_file.to_str().unwrap())?;

    let yy = nalgebra::DMatrix::<f32>::from_tsv(tsv_file.to_str().unwrap(), None)?;

    approx::assert_abs_diff_eq!(xx, yy);

    Ok(())
}

#[test]
fn ndarray_io_test() -> anyhow::Result<()> {
    let xx = ndarray::array![[1.0_f32, 2.0, 3.0], [0.5, 0.0, 9.0]];

    let tsv_file = create_temp_dir_file("tsv")?;
    xx.to_tsv(tsv_file.to_str().unwrap())?;

    let yy = ndarray::Array2::<f32>::from_tsv(tsv_file.to_str().unwrap(), None)?;

    assert_eq!(xx, yy);

    Ok(())
}

#[test]
fn ragged_tsv_is_rejected() -> anyhow::Result<()> {
    let tsv_file = create_temp_dir_file("tsv")?;
    let tsv_file = tsv_file.to_str().unwrap();
    write_lines(&["1\t2\t3", "4\t5"], tsv_file)?;

    assert!(nalgebra::DMatrix::<f32>::from_tsv(tsv_file, None).is_err());
    assert!(ndarray::Array2::<f32>::from_tsv(tsv_file, None).is_err());
    Ok(())
}

#[test]
fn mtx_io_test() -> anyhow::Result<()> {
    // 3 genes x 2 cells
    let triplets = vec![(0_u64, 0_u64, 5.0_f32), (2, 0, 1.0), (1, 1, 3.0)];

    let mtx_file = create_temp_dir_file("mtx.gz")?;
    let mtx_file = mtx_file.to_str().unwrap();
    write_mtx_triplets(&triplets, 3, 2, mtx_file)?;

    let mtx = read_mtx_triplets(mtx_file)?;
    assert_eq!((mtx.nrow, mtx.ncol), (3, 2));
    assert_eq!(
        mtx.triplets,
        vec![(0, 0, 5.0), (2, 0, 1.0), (1, 1, 3.0)]
    );

    let csc = read_mtx_csc(mtx_file, false)?;
    assert_eq!((csc.nrows(), csc.ncols()), (3, 2));
    assert_eq!(csc.nnz(), 3);

    // cells x genes
    let csc_t = read_mtx_csc(mtx_file, true)?;
    assert_eq!((csc_t.nrows(), csc_t.ncols()), (2, 3));
    let dense = nalgebra::DMatrix::from(&csc_t);
    assert_eq!(dense[(1, 1)], 3.0);
    assert_eq!(dense[(0, 2)], 1.0);
    assert_eq!(dense[(1, 0)], 0.0);

    Ok(())
}

#[test]
fn mtx_out_of_bounds_is_rejected() -> anyhow::Result<()> {
    let mtx_file = create_temp_dir_file("mtx")?;
    let mtx_file = mtx_file.to_str().unwrap();
    write_lines(
        &["%%MatrixMarket matrix coordinate real general", "2 2 1", "3 1 1"],
        mtx_file,
    )?;

    assert!(read_mtx_triplets(mtx_file).is_err());
    Ok(())
}

#[test]
fn mtx_fractional_index_is_rejected() -> anyhow::Result<()> {
    let mtx_file = create_temp_dir_file("mtx")?;
    let mtx_file = mtx_file.to_str().unwrap();
    write_lines(
        &["%%MatrixMarket matrix coordinate real general", "2 2 1", "1.7 1 1"],
        mtx_file,
    )?;

    let err = read_mtx_triplets(mtx_file).unwrap_err();
    assert!(err.to_string().contains("not a positive integer"));
    Ok(())
}

#[test]
fn first_words_test() -> anyhow::Result<()> {
    let file = create_temp_dir_file("tsv.gz")?;
    let file = file.to_str().unwrap();
    write_lines(
        &["ENSG01\tCD3E\tGene Expression", "", "ENSG02\tMS4A1"],
        file,
    )?;

    let names = read_first_words(file)?;
    let expected: Vec<Box<str>> = vec!["ENSG01".into(), "ENSG02".into()];
    assert_eq!(names, expected);
    Ok(())
}
