pub use alloy::providers::DynProvider as Provider;

/// Generates `#[sol(rpc)]` bindings for an interface and re-exports them in a
/// module of the same name, together with an `Instance` alias bound to the
/// type-erased provider.
macro_rules! bindings {
    ($contract:ident { $($body:tt)* }) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol! {
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($body)*
                    }
                }
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::$contract::*;
                pub type Instance = [<$contract Instance>]<DynProvider>;
            }
        }
    };
}

bindings!(Token {
    function addMinter(address account) external;
    function mint(uint256 amount) external;
    function transfer(address to, uint256 amount) external returns (bool);
    function approve(address spender, uint256 amount) external returns (bool);
    function totalSupply() external view returns (uint256);
    function balanceOf(address account) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
});

bindings!(PBM {
    function addAdmin(address admin) external;
    function addWhiteList(address account) external;
    function addUser(address user) external;
    function fundUser(address user, uint256 amount) external;
    function pay(address receiver, uint256 amount) external;
});
