use ficha_core::error::FichaError;
use ficha_core::model::Column;

pub fn list() -> Result<(), FichaError> {
    let width = Column::ALL
        .iter()
        .map(|c| c.letter().len())
        .max()
        .unwrap_or(1);

    println!("Export columns:\n");
    for column in Column::ALL {
        println!("  {:<width$}  {}", column.letter(), column.name(), width = width);
    }
    Ok(())
}
