use std::io::Write;

use tempfile::NamedTempFile;

pub const HEADER: &str =
    "ID do pedido,Status do pedido,Data de criação do pedido,Valor Total,Nome do Produto,Quantidade,UF";

/// Write `body` under the standard export header to a temporary `.csv` file.
pub fn orders_csv(body: &str) -> NamedTempFile {
    write_temp(".csv", &format!("{HEADER}\n{body}"))
}

pub fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
